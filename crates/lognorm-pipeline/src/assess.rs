//! Extraction, scoring and routing of one model output

use crate::config::NormalizerConfig;
use crate::error::{NormalizerError, Result};
use lognorm_domain::RoutingDecision;
use lognorm_parser::{ExtractionOutcome, RecoveryParser};
use lognorm_scorer::{ConformanceScorer, ScoreBreakdown};
use tracing::debug;

/// What became of one raw model output
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// Recovered record or failure
    pub outcome: ExtractionOutcome,

    /// Score breakdown; `None` when nothing was recovered
    pub breakdown: Option<ScoreBreakdown>,

    /// Accept or send to manual review
    pub routing: RoutingDecision,
}

impl Assessment {
    /// Confidence score; 0.0 when nothing was recovered
    pub fn confidence(&self) -> f64 {
        self.breakdown.as_ref().map_or(0.0, |b| b.total)
    }
}

/// Runs the recovery parser and the scorer in sequence
///
/// Synchronous and free of I/O; the normalizer wraps it around a provider
/// call and the CLI uses it directly on saved model output.
#[derive(Debug)]
pub struct Assessor {
    parser: RecoveryParser,
    scorer: ConformanceScorer,
    threshold: f64,
}

impl Assessor {
    /// Create an assessor from its parts
    pub fn new(parser: RecoveryParser, scorer: ConformanceScorer, threshold: f64) -> Self {
        Self {
            parser,
            scorer,
            threshold,
        }
    }

    /// Build the parser, scorer and threshold described by a configuration
    ///
    /// The configuration is validated first; a NaN threshold is rejected.
    pub fn from_config(config: &NormalizerConfig) -> Result<Self> {
        config.validate().map_err(NormalizerError::Config)?;
        Ok(Self::new(
            config.build_parser(),
            config.build_scorer()?,
            config.confidence_threshold,
        ))
    }

    /// The recovery parser in use
    pub fn parser(&self) -> &RecoveryParser {
        &self.parser
    }

    /// The scorer in use
    pub fn scorer(&self) -> &ConformanceScorer {
        &self.scorer
    }

    /// Acceptance threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Extract, score and route one raw model output
    pub fn assess(&self, raw_output: &str) -> Assessment {
        let outcome = self.parser.extract(raw_output);
        let breakdown = outcome.record().map(|record| self.scorer.breakdown(record));

        let routing = match &breakdown {
            Some(breakdown) => RoutingDecision::from_score(breakdown.total, self.threshold),
            None => RoutingDecision::ManualReview,
        };

        debug!(
            "Assessed {} chars of output: success={}, routing={}",
            raw_output.chars().count(),
            outcome.is_success(),
            routing
        );

        Assessment {
            outcome,
            breakdown,
            routing,
        }
    }
}
