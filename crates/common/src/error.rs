use thiserror::Error;

use crate::ValidationError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid metrics for '{symbol}': {reason}")]
    InvalidMetrics {
        symbol: String,
        reason: ValidationError,
    },

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
