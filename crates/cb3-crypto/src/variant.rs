//! Runtime selection between the three constructions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AeadError, LengthRequirement, Parameter};
use crate::kdf::SivKeySchedule;
use crate::{chacha20_blake3, xchacha20_blake3, xchacha20_blake3_siv};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    #[serde(rename = "chacha20-blake3")]
    ChaCha20Blake3,
    #[default]
    #[serde(rename = "xchacha20-blake3")]
    XChaCha20Blake3,
    #[serde(rename = "xchacha20-blake3-siv")]
    XChaCha20Blake3Siv,
}

impl Variant {
    pub const ALL: [Variant; 3] = [
        Variant::ChaCha20Blake3,
        Variant::XChaCha20Blake3,
        Variant::XChaCha20Blake3Siv,
    ];

    /// Display name, e.g. `XChaCha20-BLAKE3`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ChaCha20Blake3 => "ChaCha20-BLAKE3",
            Self::XChaCha20Blake3 => "XChaCha20-BLAKE3",
            Self::XChaCha20Blake3Siv => "XChaCha20-BLAKE3-SIV",
        }
    }

    /// Identifier used in config files and on the command line.
    pub const fn id(self) -> &'static str {
        match self {
            Self::ChaCha20Blake3 => "chacha20-blake3",
            Self::XChaCha20Blake3 => "xchacha20-blake3",
            Self::XChaCha20Blake3Siv => "xchacha20-blake3-siv",
        }
    }

    pub const fn key_len(self) -> usize {
        match self {
            Self::ChaCha20Blake3 | Self::XChaCha20Blake3 => crate::KEY_SIZE,
            Self::XChaCha20Blake3Siv => crate::SIV_KEY_SIZE,
        }
    }

    /// Caller nonce width; 0 when the nonce is synthesized.
    pub const fn nonce_len(self) -> usize {
        match self {
            Self::ChaCha20Blake3 => crate::CHACHA20_NONCE_SIZE,
            Self::XChaCha20Blake3 => crate::XCHACHA20_NONCE_SIZE,
            Self::XChaCha20Blake3Siv => 0,
        }
    }

    pub const fn is_deterministic(self) -> bool {
        matches!(self, Self::XChaCha20Blake3Siv)
    }

    /// Encrypt under this variant. SIV uses the canonical key schedule.
    pub fn encrypt(
        self,
        message: &[u8],
        nonce: Option<&[u8]>,
        key: &[u8],
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, AeadError> {
        Suite::from(self).encrypt(message, nonce, key, associated_data)
    }

    /// Decrypt under this variant. SIV uses the canonical key schedule.
    pub fn decrypt(
        self,
        payload: &[u8],
        nonce: Option<&[u8]>,
        key: &[u8],
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, AeadError> {
        Suite::from(self).decrypt(payload, nonce, key, associated_data)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = String;

    /// Accepts the identifier or the display name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| s.eq_ignore_ascii_case(v.id()) || s.eq_ignore_ascii_case(v.name()))
            .ok_or_else(|| {
                format!(
                    "unknown variant '{s}' (expected one of: {})",
                    Self::ALL.map(Variant::id).join(", ")
                )
            })
    }
}

/// A variant together with the SIV key schedule to use if it is SIV.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Suite {
    pub variant: Variant,
    pub siv_key_schedule: SivKeySchedule,
}

impl From<Variant> for Suite {
    fn from(variant: Variant) -> Self {
        Self {
            variant,
            siv_key_schedule: SivKeySchedule::default(),
        }
    }
}

impl Suite {
    /// `nonce` must be `Some` for the nonce-based variants and `None` (or
    /// empty) for SIV.
    pub fn encrypt(
        &self,
        message: &[u8],
        nonce: Option<&[u8]>,
        key: &[u8],
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, AeadError> {
        let nonce = nonce.unwrap_or_default();
        match self.variant {
            Variant::ChaCha20Blake3 => {
                chacha20_blake3::encrypt(message, nonce, key, associated_data)
            }
            Variant::XChaCha20Blake3 => {
                xchacha20_blake3::encrypt(message, nonce, key, associated_data)
            }
            Variant::XChaCha20Blake3Siv => {
                reject_siv_nonce(nonce)?;
                xchacha20_blake3_siv::encrypt_with_schedule(
                    message,
                    key,
                    associated_data,
                    self.siv_key_schedule,
                )
            }
        }
    }

    pub fn decrypt(
        &self,
        payload: &[u8],
        nonce: Option<&[u8]>,
        key: &[u8],
        associated_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, AeadError> {
        let nonce = nonce.unwrap_or_default();
        match self.variant {
            Variant::ChaCha20Blake3 => {
                chacha20_blake3::decrypt(payload, nonce, key, associated_data)
            }
            Variant::XChaCha20Blake3 => {
                xchacha20_blake3::decrypt(payload, nonce, key, associated_data)
            }
            Variant::XChaCha20Blake3Siv => {
                reject_siv_nonce(nonce)?;
                xchacha20_blake3_siv::decrypt_with_schedule(
                    payload,
                    key,
                    associated_data,
                    self.siv_key_schedule,
                )
            }
        }
    }
}

fn reject_siv_nonce(nonce: &[u8]) -> Result<(), AeadError> {
    if nonce.is_empty() {
        Ok(())
    } else {
        Err(AeadError::invalid(
            Parameter::Nonce,
            LengthRequirement::Exactly(0),
            nonce.len(),
        ))
    }
}
