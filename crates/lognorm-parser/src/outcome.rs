//! Extraction outcome types

use serde::Serialize;
use serde_json::{Map, Value};

/// A generic JSON object recovered from model output
pub type StructuredRecord = Map<String, Value>;

/// Why no record could be recovered
///
/// Purely diagnostic; callers route every failure the same way unless they
/// choose to retry truncated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Input was empty or whitespace only
    Empty,

    /// An opening brace was never closed; generation was likely cut off
    Truncated,

    /// No candidate parsed as a JSON object
    Malformed,
}

impl FailureKind {
    /// Get the failure kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Empty => "empty",
            FailureKind::Truncated => "truncated",
            FailureKind::Malformed => "malformed",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running the recovery parser
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// A JSON object was recovered
    Success(StructuredRecord),

    /// Nothing recoverable
    Failure(FailureKind),
}

impl ExtractionOutcome {
    /// Whether a record was recovered
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionOutcome::Success(_))
    }

    /// Borrow the recovered record
    pub fn record(&self) -> Option<&StructuredRecord> {
        match self {
            ExtractionOutcome::Success(record) => Some(record),
            ExtractionOutcome::Failure(_) => None,
        }
    }

    /// Take the recovered record
    pub fn into_record(self) -> Option<StructuredRecord> {
        match self {
            ExtractionOutcome::Success(record) => Some(record),
            ExtractionOutcome::Failure(_) => None,
        }
    }

    /// Diagnostic for a failed extraction
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ExtractionOutcome::Success(_) => None,
            ExtractionOutcome::Failure(kind) => Some(*kind),
        }
    }
}
