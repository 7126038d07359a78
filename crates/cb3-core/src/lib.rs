pub mod config;
pub mod encoding;
pub mod error;
pub mod logging;

pub use config::Cb3Config;
pub use encoding::Encoding;
pub use error::{Cb3Error, Cb3Result};
