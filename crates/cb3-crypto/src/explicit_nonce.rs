//! Shared encrypt/decrypt for the variants that take a caller nonce.
//!
//! Encrypt-then-MAC: the tag covers the ciphertext, so decryption verifies
//! before any keystream is applied and never produces unauthenticated
//! plaintext.

use zeroize::Zeroize;

use crate::error::AeadError;
use crate::kdf::{self, Contexts};
use crate::stream::Keystream;
use crate::{tag, validate, KEY_SIZE, TAG_SIZE};

pub(crate) struct Construction {
    pub(crate) name: &'static str,
    pub(crate) keystream: Keystream,
    pub(crate) contexts: Contexts,
}

impl Construction {
    pub(crate) fn encrypt(
        &self,
        message: &[u8],
        nonce: &[u8],
        key: &[u8],
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, AeadError> {
        validate::message(message)?;
        validate::nonce(nonce, self.keystream.nonce_len())?;
        let key = validate::key::<KEY_SIZE>(key)?;
        let associated_data = validate::associated_data(associated_data);

        let subkeys = kdf::derive_subkeys(key, self.contexts, nonce);

        let mut payload = Vec::with_capacity(message.len() + TAG_SIZE);
        payload.extend_from_slice(message);
        if let Err(e) = self
            .keystream
            .apply(subkeys.encryption(), nonce, &mut payload)
        {
            payload.zeroize();
            return Err(e);
        }

        let tag = tag::compute_tag(subkeys.authentication(), associated_data, &payload);
        payload.extend_from_slice(&tag);

        tracing::trace!(
            variant = self.name,
            message_len = message.len(),
            ad_len = associated_data.len(),
            "encrypted"
        );
        Ok(payload)
    }

    pub(crate) fn decrypt(
        &self,
        payload: &[u8],
        nonce: &[u8],
        key: &[u8],
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, AeadError> {
        validate::payload(payload)?;
        validate::nonce(nonce, self.keystream.nonce_len())?;
        let key = validate::key::<KEY_SIZE>(key)?;
        let associated_data = validate::associated_data(associated_data);

        let subkeys = kdf::derive_subkeys(key, self.contexts, nonce);
        let (ciphertext, tag) = tag::split_payload(payload)?;

        let mut computed = tag::compute_tag(subkeys.authentication(), associated_data, ciphertext);
        let valid = tag::verify(tag, &computed);
        computed.zeroize();
        if !valid {
            tracing::debug!(
                variant = self.name,
                payload_len = payload.len(),
                "tag mismatch, payload rejected"
            );
            return Err(AeadError::AuthenticationFailed);
        }

        let mut plaintext = ciphertext.to_vec();
        if let Err(e) = self
            .keystream
            .apply(subkeys.encryption(), nonce, &mut plaintext)
        {
            plaintext.zeroize();
            return Err(e);
        }

        tracing::trace!(
            variant = self.name,
            message_len = plaintext.len(),
            ad_len = associated_data.len(),
            "decrypted"
        );
        Ok(plaintext)
    }
}
