//! BLAKE3 tag over the canonical encoding of (associated data, data)
//!
//! ```text
//! tag = BLAKE3-keyed_hash(authentication_key, AD || data || LE64(len(AD)) || LE64(len(data)))
//! ```
//!
//! Both lengths are appended after both variable-length fields, so the tag
//! binds the exact split between AD and data, not just their concatenation.
//! `data` is the ciphertext for the nonce-based variants and the plaintext for
//! SIV.

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::error::{AeadError, LengthRequirement, Parameter};
use crate::{KEY_SIZE, TAG_SIZE, XCHACHA20_NONCE_SIZE};

/// Compute the tag for `associated_data` and `data`.
pub fn compute_tag(
    authentication_key: &[u8; KEY_SIZE],
    associated_data: &[u8],
    data: &[u8],
) -> [u8; TAG_SIZE] {
    let mut hasher = blake3::Hasher::new_keyed(authentication_key);
    hasher.update(associated_data);
    hasher.update(data);
    hasher.update(&(associated_data.len() as u64).to_le_bytes());
    hasher.update(&(data.len() as u64).to_le_bytes());
    let tag = hasher.finalize().into();
    hasher.zeroize();
    tag
}

/// Constant-time tag comparison. Runs over every byte regardless of where
/// the first difference is.
pub fn verify(expected: &[u8; TAG_SIZE], computed: &[u8; TAG_SIZE]) -> bool {
    expected[..].ct_eq(&computed[..]).into()
}

/// Split `[ciphertext][tag]` into its two parts.
pub fn split_payload(payload: &[u8]) -> Result<(&[u8], &[u8; TAG_SIZE]), AeadError> {
    let too_short = || {
        AeadError::invalid(
            Parameter::Ciphertext,
            LengthRequirement::AtLeast(TAG_SIZE + 1),
            payload.len(),
        )
    };
    let split = payload
        .len()
        .checked_sub(TAG_SIZE)
        .filter(|&at| at > 0)
        .ok_or_else(too_short)?;
    let (ciphertext, tag) = payload.split_at(split);
    let tag = <&[u8; TAG_SIZE]>::try_from(tag).map_err(|_| too_short())?;
    Ok((ciphertext, tag))
}

/// SIV nonce: the first 24 bytes of the tag.
pub fn synthetic_nonce(tag: &[u8; TAG_SIZE]) -> [u8; XCHACHA20_NONCE_SIZE] {
    let mut nonce = [0u8; XCHACHA20_NONCE_SIZE];
    nonce.copy_from_slice(&tag[..XCHACHA20_NONCE_SIZE]);
    nonce
}
