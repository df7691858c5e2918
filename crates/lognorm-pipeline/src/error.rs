//! Error types for the normalization pipeline

use lognorm_scorer::ScorerError;
use thiserror::Error;

/// Errors that can occur while normalizing a log
///
/// A record that cannot be recovered from model output is not an error;
/// it yields a zero-confidence response routed to manual review.
#[derive(Error, Debug)]
pub enum NormalizerError {
    /// Request failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Generation did not finish in time
    #[error("Generation timed out after {0}s")]
    Timeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Schema reference or rubric rejected
    #[error(transparent)]
    Scorer(#[from] ScorerError),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, NormalizerError>;
