//! Subkey derivation: master key → (encryption key, authentication key)
//!
//! Each subkey is a BLAKE3 `derive_key` output:
//!
//! ```text
//! subkey = BLAKE3-derive_key(context, salt || master_key || LE64(len(salt)) || LE64(len(master_key)))
//! ```
//!
//! The salt is the caller's nonce for the nonce-based variants and empty for
//! SIV. Each variant has its own pair of context strings, one per role.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{KEY_SIZE, SIV_KEY_SIZE};

/// A pair of BLAKE3 `derive_key` context strings, one per subkey role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contexts {
    pub encryption: &'static str,
    pub authentication: &'static str,
}

pub const CHACHA20_BLAKE3_CONTEXTS: Contexts = Contexts {
    encryption: "cb3 2026-10-19 ChaCha20-BLAKE3 encryption key",
    authentication: "cb3 2026-10-19 ChaCha20-BLAKE3 authentication key",
};

pub const XCHACHA20_BLAKE3_CONTEXTS: Contexts = Contexts {
    encryption: "cb3 2026-10-19 XChaCha20-BLAKE3 encryption key",
    authentication: "cb3 2026-10-19 XChaCha20-BLAKE3 authentication key",
};

pub const XCHACHA20_BLAKE3_SIV_CONTEXTS: Contexts = Contexts {
    encryption: "cb3 2026-10-19 XChaCha20-BLAKE3-SIV encryption key",
    authentication: "cb3 2026-10-19 XChaCha20-BLAKE3-SIV authentication key",
};

/// Encryption and authentication subkeys for one call. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Subkeys {
    encryption: [u8; KEY_SIZE],
    authentication: [u8; KEY_SIZE],
}

impl Subkeys {
    pub fn encryption(&self) -> &[u8; KEY_SIZE] {
        &self.encryption
    }

    pub fn authentication(&self) -> &[u8; KEY_SIZE] {
        &self.authentication
    }
}

impl std::fmt::Debug for Subkeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subkeys")
            .field("encryption", &"[REDACTED]")
            .field("authentication", &"[REDACTED]")
            .finish()
    }
}

/// How XChaCha20-BLAKE3-SIV turns its 64-byte key into subkeys.
///
/// The two schedules produce incompatible payloads. Encrypt and decrypt must
/// use the same one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SivKeySchedule {
    /// Both subkeys via [`derive_subkeys`] with an empty salt.
    #[default]
    Derived,
    /// Authentication key = bytes 0..32, encryption key = bytes 32..64.
    Split,
}

impl std::fmt::Display for SivKeySchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Derived => "derived",
            Self::Split => "split",
        })
    }
}

impl std::str::FromStr for SivKeySchedule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "derived" => Ok(Self::Derived),
            "split" => Ok(Self::Split),
            other => Err(format!(
                "unknown SIV key schedule '{other}' (expected 'derived' or 'split')"
            )),
        }
    }
}

/// Derive both subkeys from a master key, binding in `salt`.
pub fn derive_subkeys(master_key: &[u8], contexts: Contexts, salt: &[u8]) -> Subkeys {
    Subkeys {
        encryption: derive_key(contexts.encryption, salt, master_key),
        authentication: derive_key(contexts.authentication, salt, master_key),
    }
}

/// Subkeys for XChaCha20-BLAKE3-SIV under the chosen schedule.
pub fn siv_subkeys(master_key: &[u8; SIV_KEY_SIZE], schedule: SivKeySchedule) -> Subkeys {
    match schedule {
        SivKeySchedule::Derived => derive_subkeys(master_key, XCHACHA20_BLAKE3_SIV_CONTEXTS, &[]),
        SivKeySchedule::Split => {
            let (authentication_half, encryption_half) = master_key.split_at(KEY_SIZE);
            let mut subkeys = Subkeys {
                encryption: [0u8; KEY_SIZE],
                authentication: [0u8; KEY_SIZE],
            };
            subkeys.authentication.copy_from_slice(authentication_half);
            subkeys.encryption.copy_from_slice(encryption_half);
            subkeys
        }
    }
}

fn derive_key(context: &'static str, salt: &[u8], master_key: &[u8]) -> [u8; KEY_SIZE] {
    let mut hasher = blake3::Hasher::new_derive_key(context);
    hasher.update(salt);
    hasher.update(master_key);
    hasher.update(&(salt.len() as u64).to_le_bytes());
    hasher.update(&(master_key.len() as u64).to_le_bytes());
    let subkey = hasher.finalize().into();
    // the hasher buffers master key bytes
    hasher.zeroize();
    subkey
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CHACHA20_NONCE_SIZE;

    const ALL_CONTEXTS: [Contexts; 3] = [
        CHACHA20_BLAKE3_CONTEXTS,
        XCHACHA20_BLAKE3_CONTEXTS,
        XCHACHA20_BLAKE3_SIV_CONTEXTS,
    ];

    #[test]
    fn context_strings_are_unique() {
        let mut all: Vec<&str> = ALL_CONTEXTS
            .iter()
            .flat_map(|c| [c.encryption, c.authentication])
            .collect();
        let before = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), before, "every role/variant needs its own context");
    }

    #[test]
    fn known_subkeys_for_zero_key_and_nonce() {
        let subkeys = derive_subkeys(
            &[0u8; KEY_SIZE],
            CHACHA20_BLAKE3_CONTEXTS,
            &[0u8; CHACHA20_NONCE_SIZE],
        );
        assert_eq!(
            hex::encode(subkeys.encryption()),
            "c7be08ed65877fe3410080b8f6db9858348de848ac0845fd60e3d34b0397ec2b"
        );
        assert_eq!(
            hex::encode(subkeys.authentication()),
            "a40c179cbdf9958b80395cd6a39f1c976916afb36ce1b54576b052130bb95c3d"
        );
    }

    #[test]
    fn subkeys_are_independent() {
        for contexts in ALL_CONTEXTS {
            let subkeys = derive_subkeys(&[9u8; KEY_SIZE], contexts, b"nonce");
            assert_ne!(subkeys.encryption(), subkeys.authentication());
        }
    }

    #[test]
    fn master_key_change_changes_both_subkeys() {
        let a = derive_subkeys(&[1u8; KEY_SIZE], XCHACHA20_BLAKE3_CONTEXTS, &[0u8; 24]);
        let b = derive_subkeys(&[2u8; KEY_SIZE], XCHACHA20_BLAKE3_CONTEXTS, &[0u8; 24]);
        assert_ne!(a.encryption(), b.encryption());
        assert_ne!(a.authentication(), b.authentication());
    }

    #[test]
    fn salt_changes_subkeys() {
        let a = derive_subkeys(&[1u8; KEY_SIZE], CHACHA20_BLAKE3_CONTEXTS, &[0u8; 8]);
        let b = derive_subkeys(&[1u8; KEY_SIZE], CHACHA20_BLAKE3_CONTEXTS, &[1u8; 8]);
        assert_ne!(a.encryption(), b.encryption());
        assert_ne!(a.authentication(), b.authentication());
    }

    #[test]
    fn salt_key_boundary_is_bound() {
        // Same concatenation, different split between salt and key.
        let joined = [5u8; 40];
        let a = derive_subkeys(&joined[8..], CHACHA20_BLAKE3_CONTEXTS, &joined[..8]);
        let b = derive_subkeys(&joined[9..], CHACHA20_BLAKE3_CONTEXTS, &joined[..9]);
        assert_ne!(a.authentication(), b.authentication());
        assert_ne!(a.encryption(), b.encryption());
    }

    #[test]
    fn split_schedule_takes_halves() {
        let mut master = [0u8; SIV_KEY_SIZE];
        master[..KEY_SIZE].fill(0xAA);
        master[KEY_SIZE..].fill(0xBB);

        let subkeys = siv_subkeys(&master, SivKeySchedule::Split);
        assert_eq!(subkeys.authentication(), &[0xAA; KEY_SIZE]);
        assert_eq!(subkeys.encryption(), &[0xBB; KEY_SIZE]);
    }

    #[test]
    fn derived_schedule_differs_from_split() {
        let master = [3u8; SIV_KEY_SIZE];
        let derived = siv_subkeys(&master, SivKeySchedule::Derived);
        let split = siv_subkeys(&master, SivKeySchedule::Split);
        assert_ne!(derived.encryption(), split.encryption());
        assert_ne!(derived.authentication(), split.authentication());
        assert_ne!(derived.encryption(), derived.authentication());
    }

    #[test]
    fn schedule_parses_and_displays() {
        assert_eq!("derived".parse::<SivKeySchedule>(), Ok(SivKeySchedule::Derived));
        assert_eq!("Split".parse::<SivKeySchedule>(), Ok(SivKeySchedule::Split));
        assert!("halves".parse::<SivKeySchedule>().is_err());
        assert_eq!(SivKeySchedule::Split.to_string(), "split");
    }

    #[test]
    fn debug_redacts_subkeys() {
        let subkeys = derive_subkeys(&[1u8; KEY_SIZE], CHACHA20_BLAKE3_CONTEXTS, &[]);
        let rendered = format!("{subkeys:?}");
        assert!(rendered.contains("REDACTED"));
    }
}
