//! Length checks run before any key derivation or keystream work.

use crate::error::{AeadError, LengthRequirement, Parameter};
use crate::{MAX_MESSAGE_SIZE, TAG_SIZE};

/// A message must be non-empty and fit in the keystream.
pub(crate) fn message(message: &[u8]) -> Result<(), AeadError> {
    if message.is_empty() {
        return Err(AeadError::invalid(
            Parameter::Message,
            LengthRequirement::AtLeast(1),
            0,
        ));
    }
    if message.len() as u64 > MAX_MESSAGE_SIZE {
        return Err(AeadError::invalid(
            Parameter::Message,
            LengthRequirement::AtMost(MAX_MESSAGE_SIZE),
            message.len(),
        ));
    }
    Ok(())
}

/// A payload must hold at least one ciphertext byte in front of the tag.
pub(crate) fn payload(payload: &[u8]) -> Result<(), AeadError> {
    if payload.len() <= TAG_SIZE {
        return Err(AeadError::invalid(
            Parameter::Ciphertext,
            LengthRequirement::AtLeast(TAG_SIZE + 1),
            payload.len(),
        ));
    }
    if (payload.len() - TAG_SIZE) as u64 > MAX_MESSAGE_SIZE {
        return Err(AeadError::invalid(
            Parameter::Ciphertext,
            LengthRequirement::AtMost(MAX_MESSAGE_SIZE + TAG_SIZE as u64),
            payload.len(),
        ));
    }
    Ok(())
}

pub(crate) fn nonce(nonce: &[u8], expected: usize) -> Result<(), AeadError> {
    if nonce.len() != expected {
        return Err(AeadError::invalid(
            Parameter::Nonce,
            LengthRequirement::Exactly(expected),
            nonce.len(),
        ));
    }
    Ok(())
}

/// Check the key length and hand back a fixed-size view of it.
pub(crate) fn key<const N: usize>(key: &[u8]) -> Result<&[u8; N], AeadError> {
    <&[u8; N]>::try_from(key)
        .map_err(|_| AeadError::invalid(Parameter::Key, LengthRequirement::Exactly(N), key.len()))
}

/// Absent associated data is the empty sequence.
pub(crate) fn associated_data(associated_data: Option<&[u8]>) -> &[u8] {
    associated_data.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_rejected() {
        assert_eq!(
            message(b""),
            Err(AeadError::invalid(
                Parameter::Message,
                LengthRequirement::AtLeast(1),
                0
            ))
        );
        assert!(message(b"x").is_ok());
    }

    #[test]
    fn payload_must_exceed_tag() {
        for len in [0, 1, TAG_SIZE - 1, TAG_SIZE] {
            let err = payload(&vec![0u8; len]).unwrap_err();
            assert_eq!(
                err,
                AeadError::invalid(
                    Parameter::Ciphertext,
                    LengthRequirement::AtLeast(TAG_SIZE + 1),
                    len
                )
            );
        }
        assert!(payload(&[0u8; TAG_SIZE + 1]).is_ok());
    }

    #[test]
    fn nonce_length_is_exact() {
        assert!(nonce(&[0u8; 8], 8).is_ok());
        assert_eq!(
            nonce(&[0u8; 9], 8),
            Err(AeadError::invalid(
                Parameter::Nonce,
                LengthRequirement::Exactly(8),
                9
            ))
        );
    }

    #[test]
    fn key_length_is_exact() {
        let bytes = [7u8; 64];
        assert_eq!(key::<64>(&bytes).unwrap(), &bytes);
        assert_eq!(
            key::<32>(&bytes),
            Err(AeadError::invalid(
                Parameter::Key,
                LengthRequirement::Exactly(32),
                64
            ))
        );
        assert!(key::<32>(&bytes[..31]).is_err());
    }

    #[test]
    fn absent_associated_data_is_empty() {
        assert_eq!(associated_data(None), b"");
        assert_eq!(associated_data(Some(b"ad")), b"ad");
    }
}
