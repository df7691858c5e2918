//! CLI configuration: output format and normalizer settings.

use crate::cli::CliFormat;
use crate::error::Result;
use lognorm_pipeline::{NormalizerConfig, NormalizerError};
use std::path::Path;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

/// Load the normalizer configuration.
///
/// Reads `path` when given, otherwise uses the defaults. A threshold given
/// on the command line overrides the file and is clamped like one from it;
/// the result is validated, so a NaN threshold is an error.
pub fn load_config(path: Option<&Path>, threshold: Option<f64>) -> Result<NormalizerConfig> {
    let mut config = match path {
        Some(path) => NormalizerConfig::from_file(path)?,
        None => NormalizerConfig::default(),
    };

    if let Some(threshold) = threshold {
        config.confidence_threshold = threshold;
        config = config.clamped();
    }

    config.validate().map_err(NormalizerError::Config)?;
    Ok(config)
}
