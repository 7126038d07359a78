//! ChaCha20-BLAKE3: 32-byte key, 8-byte nonce
//!
//! Payload: `[ciphertext][32-byte BLAKE3 tag]`
//!
//! Never reuse a nonce with the same key. With only 64 bits of nonce a
//! counter is the safe choice; random nonces belong with
//! [`xchacha20_blake3`](crate::xchacha20_blake3).

use crate::error::AeadError;
use crate::explicit_nonce::Construction;
use crate::kdf::CHACHA20_BLAKE3_CONTEXTS;
use crate::stream::Keystream;

pub use crate::{CHACHA20_NONCE_SIZE as NONCE_SIZE, KEY_SIZE, TAG_SIZE};

const CONSTRUCTION: Construction = Construction {
    name: "ChaCha20-BLAKE3",
    keystream: Keystream::ChaCha20,
    contexts: CHACHA20_BLAKE3_CONTEXTS,
};

/// Encrypt `message` and append the tag.
///
/// - `nonce`: 8 bytes, unique per key
/// - `key`: 32 bytes
/// - `associated_data`: authenticated but not encrypted; `None` is empty
pub fn encrypt(
    message: &[u8],
    nonce: &[u8],
    key: &[u8],
    associated_data: Option<&[u8]>,
) -> Result<Vec<u8>, AeadError> {
    CONSTRUCTION.encrypt(message, nonce, key, associated_data)
}

/// Verify the tag, then decrypt. Nothing is decrypted if the tag is wrong.
pub fn decrypt(
    payload: &[u8],
    nonce: &[u8],
    key: &[u8],
    associated_data: Option<&[u8]>,
) -> Result<Vec<u8>, AeadError> {
    CONSTRUCTION.decrypt(payload, nonce, key, associated_data)
}
