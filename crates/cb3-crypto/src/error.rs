//! Error taxonomy for the AEAD constructions

use std::fmt;

use thiserror::Error;

/// Errors returned by every encrypt/decrypt operation.
///
/// Invalid-parameter errors are detected from lengths alone, before any
/// cryptographic work. Authentication failures carry no detail about what
/// differed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AeadError {
    #[error("invalid {parameter} length: expected {expected}, got {actual} bytes")]
    InvalidParameter {
        parameter: Parameter,
        expected: LengthRequirement,
        actual: usize,
    },

    #[error("authentication failed")]
    AuthenticationFailed,
}

impl AeadError {
    pub(crate) fn invalid(parameter: Parameter, expected: LengthRequirement, actual: usize) -> Self {
        Self::InvalidParameter {
            parameter,
            expected,
            actual,
        }
    }

    /// True for `InvalidParameter`, regardless of which parameter.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

/// The input an `InvalidParameter` error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    Key,
    Nonce,
    Message,
    Ciphertext,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Key => "key",
            Self::Nonce => "nonce",
            Self::Message => "message",
            Self::Ciphertext => "ciphertext",
        })
    }
}

/// The length a parameter was required to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthRequirement {
    Exactly(usize),
    AtLeast(usize),
    AtMost(u64),
}

impl fmt::Display for LengthRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
            Self::AtMost(n) => write!(f, "at most {n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_message_names_expected_and_actual() {
        let err = AeadError::invalid(Parameter::Nonce, LengthRequirement::Exactly(24), 12);
        assert_eq!(
            err.to_string(),
            "invalid nonce length: expected exactly 24, got 12 bytes"
        );
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn authentication_failure_is_opaque() {
        let err = AeadError::AuthenticationFailed;
        assert_eq!(err.to_string(), "authentication failed");
        assert!(!err.is_invalid_parameter());
    }
}
