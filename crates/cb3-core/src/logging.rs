//! tracing-subscriber setup for front ends
//!
//! Logs go to stderr so stdout stays clean for keys and payloads.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{Cb3Error, Cb3Result};

/// Install the global subscriber. `RUST_LOG` overrides `config.level`.
pub fn init(config: &LoggingConfig) -> Cb3Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            Cb3Error::Config(format!("invalid log level '{}': {e}", config.level))
        })?,
    };

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    installed.map_err(|e| Cb3Error::Other(anyhow::anyhow!("installing tracing subscriber: {e}")))
}
