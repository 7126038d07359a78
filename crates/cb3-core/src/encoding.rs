//! Text encodings for keys, nonces, and payloads on the command line

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{Cb3Error, Cb3Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Lowercase hex
    #[default]
    Hex,
    /// Standard base64 with padding
    Base64,
}

impl Encoding {
    pub fn encode(self, data: &[u8]) -> String {
        match self {
            Self::Hex => hex::encode(data),
            Self::Base64 => STANDARD.encode(data),
        }
    }

    /// Decode `text`, ignoring surrounding whitespace (trailing newlines from
    /// files and pipes).
    pub fn decode(self, text: &str) -> Cb3Result<Vec<u8>> {
        let text = text.trim();
        match self {
            Self::Hex => hex::decode(text).map_err(|e| Cb3Error::Encoding(format!("hex decode: {e}"))),
            Self::Base64 => STANDARD
                .decode(text)
                .map_err(|e| Cb3Error::Encoding(format!("base64 decode: {e}"))),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hex => "hex",
            Self::Base64 => "base64",
        })
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            other => Err(format!("unknown encoding '{other}' (expected 'hex' or 'base64')")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let data = [0x00, 0x7f, 0xff, 0x10];
        let text = Encoding::Hex.encode(&data);
        assert_eq!(text, "007fff10");
        assert_eq!(Encoding::Hex.decode(&text).unwrap(), data);
    }

    #[test]
    fn base64_roundtrip() {
        let text = Encoding::Base64.encode(b"cb3");
        assert_eq!(text, "Y2Iz");
        assert_eq!(Encoding::Base64.decode("Y2Iz\n").unwrap(), b"cb3");
    }

    #[test]
    fn decode_trims_whitespace() {
        assert_eq!(Encoding::Hex.decode("  abcd\r\n").unwrap(), vec![0xab, 0xcd]);
    }

    #[test]
    fn invalid_input_is_encoding_error() {
        assert!(matches!(
            Encoding::Hex.decode("xyz"),
            Err(Cb3Error::Encoding(_))
        ));
        assert!(matches!(
            Encoding::Base64.decode("!!!"),
            Err(Cb3Error::Encoding(_))
        ));
    }

    #[test]
    fn parse_names() {
        assert_eq!("HEX".parse::<Encoding>(), Ok(Encoding::Hex));
        assert_eq!("base64".parse::<Encoding>(), Ok(Encoding::Base64));
        assert!("base32".parse::<Encoding>().is_err());
    }
}
