//! Configuration for the Normalizer

use crate::error::{NormalizerError, Result};
use crate::prompt::FewShotExample;
use lognorm_domain::routing::clamp_unit;
use lognorm_domain::{
    IdentifierCoercion, SchemaDefinition, SchemaReference, ScoringRubric,
    DEFAULT_CONFIDENCE_THRESHOLD,
};
use lognorm_parser::RecoveryParser;
use lognorm_scorer::ConformanceScorer;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Default bound on a single raw log entry (characters)
pub const DEFAULT_MAX_RAW_LOG_CHARS: usize = 10_000;

/// Configuration for the Normalizer
///
/// Every field has a default, so a TOML file only needs the keys it changes.
/// The optional `[schema]` table replaces the built-in OCSF catalog and the
/// `[rubric]` table overrides scoring weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Scores at or above this are accepted; clamped to [0.0, 1.0]
    pub confidence_threshold: f64,

    /// Maximum raw log length (characters)
    pub max_raw_log_chars: usize,

    /// Retry candidates after repairing Python-literal syntax
    pub lenient_quotes: bool,

    /// Maximum time for a single generation call (seconds)
    pub generation_timeout_secs: u64,

    /// Maximum few-shot examples placed in the prompt
    pub max_examples: usize,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Few-shot examples for the prompt
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<FewShotExample>,

    /// Schema reference override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaDefinition>,

    /// Scoring rubric
    pub rubric: ScoringRubric,
}

impl Default for NormalizerConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            max_raw_log_chars: DEFAULT_MAX_RAW_LOG_CHARS,
            lenient_quotes: true,
            generation_timeout_secs: 120,
            max_examples: 2,
            log_level: "info".to_string(),
            examples: Vec::new(),
            schema: None,
            rubric: ScoringRubric::default(),
        }
    }
}

impl NormalizerConfig {
    /// Aggressive preset: stricter acceptance, strict parsing and coercion
    pub fn aggressive() -> Self {
        Self {
            confidence_threshold: 0.95,
            max_raw_log_chars: 4_000,
            lenient_quotes: false,
            generation_timeout_secs: 30,
            rubric: ScoringRubric::strict(),
            ..Self::default()
        }
    }

    /// Lenient preset: accept more, wait longer
    pub fn lenient() -> Self {
        Self {
            confidence_threshold: 0.70,
            max_raw_log_chars: 20_000,
            lenient_quotes: true,
            generation_timeout_secs: 300,
            max_examples: 4,
            rubric: ScoringRubric {
                coercion: IdentifierCoercion::Lenient,
                ..ScoringRubric::default()
            },
            ..Self::default()
        }
    }

    /// Get the generation timeout as a Duration
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Clamp the threshold into [0.0, 1.0]
    ///
    /// Out-of-range thresholds are a typo, not a reason to refuse to start.
    /// NaN is left alone so `validate` can reject it.
    pub fn clamped(mut self) -> Self {
        if !self.confidence_threshold.is_nan() {
            self.confidence_threshold = clamp_unit(self.confidence_threshold);
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.confidence_threshold.is_nan() {
            return Err("confidence_threshold must be a number".to_string());
        }
        if self.max_raw_log_chars == 0 {
            return Err("max_raw_log_chars must be greater than 0".to_string());
        }
        if self.generation_timeout_secs == 0 {
            return Err("generation_timeout_secs must be greater than 0".to_string());
        }
        if self.log_level.trim().is_empty() {
            return Err("log_level must not be empty".to_string());
        }
        self.rubric.validate()?;
        if let Some(schema) = &self.schema {
            SchemaReference::from_definition(schema.clone())?;
        }
        Ok(())
    }

    /// Build the schema reference: the override if present, else OCSF
    pub fn schema_reference(&self) -> Result<SchemaReference> {
        match &self.schema {
            Some(definition) => SchemaReference::from_definition(definition.clone())
                .map_err(NormalizerError::Config),
            None => Ok(SchemaReference::ocsf()),
        }
    }

    /// Build the conformance scorer for this configuration
    pub fn build_scorer(&self) -> Result<ConformanceScorer> {
        let schema = Arc::new(self.schema_reference()?);
        Ok(ConformanceScorer::with_rubric(schema, self.rubric.clone())?)
    }

    /// Build the recovery parser for this configuration
    pub fn build_parser(&self) -> RecoveryParser {
        RecoveryParser::new().with_lenient_quotes(self.lenient_quotes)
    }

    /// Load configuration from TOML string
    ///
    /// The threshold is clamped and the result validated.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(toml_str)?.clamped();
        config.validate().map_err(NormalizerError::Config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
