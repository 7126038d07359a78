use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use cb3_crypto::variant::Suite;
use cb3_crypto::{SivKeySchedule, Variant};

use crate::encoding::Encoding;
use crate::error::{Cb3Error, Cb3Result};

/// Top-level configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Cb3Config {
    pub cipher: CipherConfig,
    pub encoding: EncodingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CipherConfig {
    /// Construction used when none is given on the command line
    /// (default: xchacha20-blake3)
    pub variant: Variant,
    /// Key schedule for xchacha20-blake3-siv: "derived" or "split"
    pub siv_key_schedule: SivKeySchedule,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// Text encoding for keys, nonces, and payloads: "hex" or "base64"
    pub format: Encoding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (default: warn); RUST_LOG takes precedence
    pub level: String,
    /// Log format: "text" or "json"
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}' (expected 'text' or 'json')")),
        }
    }
}

impl Cb3Config {
    /// `~/.config/cb3/config.toml`, or `None` when `HOME` is unset.
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config/cb3/config.toml"))
    }

    /// Load and validate a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Cb3Result<Self> {
        if !path.exists() {
            tracing::debug!("config file not found: {} (using defaults)", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Cb3Error::Config(format!("parsing {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Cb3Result<()> {
        tracing_subscriber::EnvFilter::try_new(&self.logging.level).map_err(|e| {
            Cb3Error::Config(format!("invalid logging.level '{}': {e}", self.logging.level))
        })?;
        Ok(())
    }

    /// The configured variant with the configured SIV key schedule.
    pub fn suite(&self) -> Suite {
        Suite {
            variant: self.cipher.variant,
            siv_key_schedule: self.cipher.siv_key_schedule,
        }
    }
}
