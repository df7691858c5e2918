//! Normalization response

use crate::assess::Assessment;
use lognorm_domain::routing::clamp_unit;
use lognorm_domain::RoutingDecision;
use lognorm_parser::{ExtractionOutcome, FailureKind, StructuredRecord};
use serde::Serialize;

/// What the normalizer returns for one log
///
/// Successful and failed extractions share this shape:
///
/// - success: `ocsf = {...}`, `confidence` from the scorer, `error = None`
/// - failure: `ocsf = {}`, `confidence = 0.0`, `error = Some(..)`
///
/// A failed extraction is routable (to manual review), not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizeResponse {
    /// Recovered record, empty on failure
    pub ocsf: StructuredRecord,

    /// Confidence score in [0.0, 1.0]
    pub confidence: f64,

    /// Routing decision against the configured threshold
    pub routing: RoutingDecision,

    /// Wall-clock time spent, in milliseconds
    pub processing_time_ms: u64,

    /// Why extraction failed, if it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Diagnostic failure kind, if extraction failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,

    /// Few-shot examples included in the prompt
    pub examples_used: usize,

    /// Model that produced the output
    pub model: String,
}

impl NormalizeResponse {
    /// Build a response from an assessment
    pub fn from_assessment(
        assessment: Assessment,
        processing_time_ms: u64,
        examples_used: usize,
        model: impl Into<String>,
    ) -> Self {
        let confidence = clamp_unit(assessment.confidence());
        let (ocsf, failure) = match assessment.outcome {
            ExtractionOutcome::Success(record) => (record, None),
            ExtractionOutcome::Failure(kind) => (StructuredRecord::new(), Some(kind)),
        };

        Self {
            ocsf,
            confidence,
            routing: assessment.routing,
            processing_time_ms,
            error: failure.map(|kind| format!("JSON extraction failed: {} output", kind)),
            failure,
            examples_used,
            model: model.into(),
        }
    }

    /// Whether a record was recovered
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
