use thiserror::Error;

pub type Cb3Result<T> = Result<T, Cb3Error>;

/// Errors from config loading, text decoding and logging setup. The AEAD
/// itself reports through `cb3_crypto::AeadError`.
#[derive(Debug, Error)]
pub enum Cb3Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
