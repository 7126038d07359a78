//! XChaCha20-BLAKE3: 32-byte key, 24-byte nonce
//!
//! Payload: `[ciphertext][32-byte BLAKE3 tag]`
//!
//! The 192-bit nonce is large enough to pick at random per message
//! (see [`generate_nonce`](crate::generate_nonce)). Never reuse a nonce with
//! the same key.

use crate::error::AeadError;
use crate::explicit_nonce::Construction;
use crate::kdf::XCHACHA20_BLAKE3_CONTEXTS;
use crate::stream::Keystream;

pub use crate::{KEY_SIZE, TAG_SIZE, XCHACHA20_NONCE_SIZE as NONCE_SIZE};

const CONSTRUCTION: Construction = Construction {
    name: "XChaCha20-BLAKE3",
    keystream: Keystream::XChaCha20,
    contexts: XCHACHA20_BLAKE3_CONTEXTS,
};

/// Encrypt `message` and append the tag.
///
/// - `nonce`: 24 bytes, unique per key (random is fine)
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
