//! Call-through to the ChaCha20 family of stream ciphers.
//!
//! XOR with the keystream is its own inverse, so one call serves both
//! directions.

use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::{ChaCha20Legacy, XChaCha20};

use crate::error::{AeadError, LengthRequirement, Parameter};
use crate::{CHACHA20_NONCE_SIZE, KEY_SIZE, MAX_MESSAGE_SIZE, XCHACHA20_NONCE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keystream {
    /// Original ChaCha20 with a 64-bit nonce
    ChaCha20,
    /// XChaCha20 with a 192-bit nonce
    XChaCha20,
}

impl Keystream {
    pub(crate) const fn nonce_len(self) -> usize {
        match self {
            Self::ChaCha20 => CHACHA20_NONCE_SIZE,
            Self::XChaCha20 => XCHACHA20_NONCE_SIZE,
        }
    }

    /// XOR `buf` in place with the keystream for (`key`, `nonce`).
    pub(crate) fn apply(
        self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8],
        buf: &mut [u8],
    ) -> Result<(), AeadError> {
        match self {
            Self::ChaCha20 => xor::<ChaCha20Legacy>(key, nonce, self.nonce_len(), buf),
            Self::XChaCha20 => xor::<XChaCha20>(key, nonce, self.nonce_len(), buf),
        }
    }
}

fn xor<C: KeyIvInit + StreamCipher>(
    key: &[u8; KEY_SIZE],
    nonce: &[u8],
    nonce_len: usize,
    buf: &mut [u8],
) -> Result<(), AeadError> {
    let mut cipher = C::new_from_slices(key, nonce).map_err(|_| {
        AeadError::invalid(
            Parameter::Nonce,
            LengthRequirement::Exactly(nonce_len),
            nonce.len(),
        )
    })?;
    cipher.try_apply_keystream(buf).map_err(|_| {
        AeadError::invalid(
            Parameter::Message,
            LengthRequirement::AtMost(MAX_MESSAGE_SIZE),
            buf.len(),
        )
    })
}
