//! Key and nonce generation
//!
//! The AEAD functions take raw byte slices. These wrappers exist for callers
//! that want freshly generated material which is wiped when dropped.

use rand::RngCore;
use zeroize::Zeroize;

use crate::variant::Variant;
use crate::{KEY_SIZE, SIV_KEY_SIZE};

/// A 256-bit key for ChaCha20-BLAKE3 / XChaCha20-BLAKE3. Zeroized on drop.
#[derive(Clone)]
pub struct Key {
    bytes: [u8; KEY_SIZE],
}

impl Key {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Key").field("bytes", &"[REDACTED]").finish()
    }
}

/// A 512-bit key for XChaCha20-BLAKE3-SIV. Zeroized on drop.
#[derive(Clone)]
pub struct SivKey {
    bytes: [u8; SIV_KEY_SIZE],
}

impl SivKey {
    pub fn from_bytes(bytes: [u8; SIV_KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; SIV_KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for SivKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for SivKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SivKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Generate a random 256-bit key.
pub fn generate_key() -> Key {
    let mut bytes = [0u8; KEY_SIZE];
    rand::thread_rng().fill_bytes(&mut bytes);
    Key::from_bytes(bytes)
}

/// Generate a random 512-bit SIV key.
pub fn generate_siv_key() -> SivKey {
    let mut bytes = [0u8; SIV_KEY_SIZE];
    rand::thread_rng().fill_bytes(&mut bytes);
    SivKey::from_bytes(bytes)
}

/// Generate a random nonce of the variant's width (empty for SIV).
///
/// Random 64-bit nonces collide after about 2^32 messages under one key;
/// prefer a counter for ChaCha20-BLAKE3.
pub fn generate_nonce(variant: Variant) -> Vec<u8> {
    let mut nonce = vec![0u8; variant.nonce_len()];
    rand::thread_rng().fill_bytes(&mut nonce);
    nonce
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_generation() {
        let k1 = generate_key();
        let k2 = generate_key();
        assert_ne!(k1.as_bytes(), k2.as_bytes(), "random keys must differ");
    }

    #[test]
    fn test_siv_key_generation() {
        let k1 = generate_siv_key();
        let k2 = generate_siv_key();
        assert_ne!(k1.as_bytes(), k2.as_bytes());
        assert_eq!(k1.as_bytes().len(), SIV_KEY_SIZE);
    }

    #[test]
    fn test_nonce_widths() {
        assert_eq!(generate_nonce(Variant::ChaCha20Blake3).len(), 8);
        assert_eq!(generate_nonce(Variant::XChaCha20Blake3).len(), 24);
        assert!(generate_nonce(Variant::XChaCha20Blake3Siv).is_empty());
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = Key::from_bytes([0xEE; KEY_SIZE]);
        let rendered = format!("{key:?}");
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("238"));
    }
}
