//! XChaCha20-BLAKE3-SIV: 64-byte key, nonce synthesized from the tag
//!
//! ```text
//! tag   = BLAKE3-keyed_hash(auth_key, AD || M || LE64(len(AD)) || LE64(len(M)))
//! nonce = tag[0..24]
//! C     = XChaCha20(enc_key, nonce) ⊕ M
//! payload = C || tag
//! ```
//!
//! Deterministic: the same (key, AD, message) always gives the same payload,
//! so there is no nonce to misuse, but equal plaintexts are visible as equal
//! payloads. Use the nonce-based variants when that matters.
//!
//! Decryption must recover the candidate plaintext before it can recompute
//! the tag. On mismatch the candidate is zeroized and never returned.

use zeroize::Zeroize;

use crate::error::AeadError;
use crate::kdf::{self, SivKeySchedule};
use crate::stream::Keystream;
use crate::{tag, validate};

pub use crate::{SIV_KEY_SIZE as KEY_SIZE, TAG_SIZE};

const NAME: &str = "XChaCha20-BLAKE3-SIV";

/// Encrypt with the canonical [`SivKeySchedule::Derived`] schedule.
pub fn encrypt(
    message: &[u8],
    key: &[u8],
    associated_data: Option<&[u8]>,
) -> Result<Vec<u8>, AeadError> {
    encrypt_with_schedule(message, key, associated_data, SivKeySchedule::Derived)
}

/// Decrypt with the canonical [`SivKeySchedule::Derived`] schedule.
pub fn decrypt(
    payload: &[u8],
    key: &[u8],
    associated_data: Option<&[u8]>,
) -> Result<Vec<u8>, AeadError> {
    decrypt_with_schedule(payload, key, associated_data, SivKeySchedule::Derived)
}

pub fn encrypt_with_schedule(
    message: &[u8],
    key: &[u8],
    associated_data: Option<&[u8]>,
    schedule: SivKeySchedule,
) -> Result<Vec<u8>, AeadError> {
    validate::message(message)?;
    let key = validate::key::<KEY_SIZE>(key)?;
    let associated_data = validate::associated_data(associated_data);

    let subkeys = kdf::siv_subkeys(key, schedule);
    let tag = tag::compute_tag(subkeys.authentication(), associated_data, message);
    let nonce = tag::synthetic_nonce(&tag);

    let mut payload = Vec::with_capacity(message.len() + TAG_SIZE);
    payload.extend_from_slice(message);
    if let Err(e) = Keystream::XChaCha20.apply(subkeys.encryption(), &nonce, &mut payload) {
        payload.zeroize();
        return Err(e);
    }
    payload.extend_from_slice(&tag);

    tracing::trace!(
        variant = NAME,
        %schedule,
        message_len = message.len(),
        ad_len = associated_data.len(),
        "encrypted"
    );
    Ok(payload)
}

pub fn decrypt_with_schedule(
    payload: &[u8],
    key: &[u8],
    associated_data: Option<&[u8]>,
    schedule: SivKeySchedule,
) -> Result<Vec<u8>, AeadError> {
    validate::payload(payload)?;
    let key = validate::key::<KEY_SIZE>(key)?;
    let associated_data = validate::associated_data(associated_data);

    let subkeys = kdf::siv_subkeys(key, schedule);
    let (ciphertext, tag) = tag::split_payload(payload)?;
    let nonce = tag::synthetic_nonce(tag);

    let mut candidate = ciphertext.to_vec();
    if let Err(e) = Keystream::XChaCha20.apply(subkeys.encryption(), &nonce, &mut candidate) {
        candidate.zeroize();
        return Err(e);
    }

    let mut computed = tag::compute_tag(subkeys.authentication(), associated_data, &candidate);
    let valid = tag::verify(tag, &computed);
    computed.zeroize();
    if !valid {
        candidate.zeroize();
        tracing::debug!(
            variant = NAME,
            %schedule,
            payload_len = payload.len(),
            "tag mismatch, candidate plaintext erased"
        );
        return Err(AeadError::AuthenticationFailed);
    }

    Ok(candidate)
}
