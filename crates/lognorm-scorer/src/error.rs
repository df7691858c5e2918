//! Scorer error types

use thiserror::Error;

/// Errors raised while configuring a scorer
///
/// Scoring itself never fails; only construction with bad reference data does.
#[derive(Error, Debug)]
pub enum ScorerError {
    /// Rubric weights failed validation
    #[error("Invalid scoring rubric: {0}")]
    InvalidRubric(String),

    /// Schema definition failed validation
    #[error("Invalid schema reference: {0}")]
    InvalidSchema(String),
}
