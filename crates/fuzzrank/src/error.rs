//! Error types for the fuzzrank collaborators and CLI.

use fuzzrank_core::ConfigError;
use thiserror::Error;

/// Common error type for fuzzrank operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Query rejected by the validation hook
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Selection thresholds out of range
    #[error("selection config: {0}")]
    Select(#[from] ConfigError),

    /// Scorer name not recognised
    #[error("unknown scorer '{0}' (expected ratio, partial, token_sort, token_set or weighted)")]
    UnknownScorer(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using fuzzrank Error.
pub type Result<T> = std::result::Result<T, Error>;
