//! cb3-crypto: committing AEAD built from ChaCha20 and BLAKE3
//!
//! Three constructions share one key schedule and one tag encoding:
//!
//! | Module | Key | Nonce | Stream cipher |
//! |---|---|---|---|
//! | [`chacha20_blake3`] | 32 bytes | 8 bytes | ChaCha20 (64-bit nonce) |
//! | [`xchacha20_blake3`] | 32 bytes | 24 bytes | XChaCha20 |
//! | [`xchacha20_blake3_siv`] | 64 bytes | synthesized | XChaCha20 |
//!
//! Pipeline:
//! ```text
//! master key ──BLAKE3 derive_key(context, salt || key || len(salt) || len(key))──┐
//!   ├── encryption subkey     → ChaCha20 / XChaCha20 keystream
//!   └── authentication subkey → BLAKE3 keyed hash over
//!                                AD || C || len(AD) || len(C)   (lengths LE64)
//! ```
//!
//! Payload layout for every variant: `[ciphertext][32-byte tag]`.
//!
//! The tag is a keyed hash under a subkey derived from the master key, so a
//! payload authenticates under exactly one key (key commitment).
//!
//! # Memory hygiene
//!
//! Subkeys, recomputed tags and the candidate plaintext of a failed SIV
//! decryption are overwritten with [`zeroize`] before the call returns.
//! Copies the compiler makes when moving values, and anything left behind in
//! caller-owned buffers, are outside this crate's control.

pub mod chacha20_blake3;
pub mod error;
pub mod kdf;
pub mod keys;
pub mod tag;
pub mod variant;
pub mod xchacha20_blake3;
pub mod xchacha20_blake3_siv;

mod explicit_nonce;
mod stream;
mod validate;

pub use error::{AeadError, LengthRequirement, Parameter};
pub use kdf::{SivKeySchedule, Subkeys};
pub use keys::{generate_key, generate_nonce, generate_siv_key, Key, SivKey};
pub use variant::{Suite, Variant};

/// Master key size for ChaCha20-BLAKE3 and XChaCha20-BLAKE3 (256-bit)
pub const KEY_SIZE: usize = 32;

/// Master key size for XChaCha20-BLAKE3-SIV (two 256-bit halves)
pub const SIV_KEY_SIZE: usize = 64;

/// Nonce size for ChaCha20-BLAKE3 (64-bit)
pub const CHACHA20_NONCE_SIZE: usize = 8;

/// Nonce size for XChaCha20-BLAKE3 (192-bit)
pub const XCHACHA20_NONCE_SIZE: usize = 24;

/// Size of a BLAKE3 authentication tag
pub const TAG_SIZE: usize = 32;

/// Longest message the stream ciphers can process: 2^32 - 1 blocks of 64 bytes.
pub const MAX_MESSAGE_SIZE: u64 = u32::MAX as u64 * 64;

// The SIV nonce is a prefix of the tag.
const _: () = assert!(TAG_SIZE >= XCHACHA20_NONCE_SIZE);
