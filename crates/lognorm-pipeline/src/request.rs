//! Normalization request and its validation

use crate::error::{NormalizerError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Known log formats
///
/// Parsing is case-insensitive and ignores surrounding whitespace, so
/// `"CEF"`, `"Cef"` and `" cef "` all name the same format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogFormat {
    /// JSON log lines
    Json,
    /// ArcSight Common Event Format
    Cef,
    /// Syslog (RFC 3164 / 5424)
    Syslog,
    /// Comma-separated values
    Csv,
    /// IBM Log Event Extended Format
    Leef,
    /// Format not known
    #[default]
    Unknown,
}

impl LogFormat {
    /// All formats, in declaration order
    pub const ALL: [LogFormat; 6] = [
        LogFormat::Json,
        LogFormat::Cef,
        LogFormat::Syslog,
        LogFormat::Csv,
        LogFormat::Leef,
        LogFormat::Unknown,
    ];

    /// Get the format name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Cef => "cef",
            LogFormat::Syslog => "syslog",
            LogFormat::Csv => "csv",
            LogFormat::Leef => "leef",
            LogFormat::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = NormalizerError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        LogFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == wanted)
            .ok_or_else(|| {
                NormalizerError::InvalidRequest(format!(
                    "unknown log format '{}' (expected one of: json, cef, syslog, csv, leef, unknown)",
                    s
                ))
            })
    }
}

impl TryFrom<String> for LogFormat {
    type Error = NormalizerError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<LogFormat> for String {
    fn from(format: LogFormat) -> Self {
        format.as_str().to_string()
    }
}

/// One log line to normalize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeRequest {
    /// The raw log entry
    pub raw_log: String,

    /// Product that produced the log (e.g. `palo-alto`)
    pub source: String,

    /// Log format hint
    #[serde(default)]
    pub format: LogFormat,
}

impl NormalizeRequest {
    /// Create a request with an unknown format
    pub fn new(raw_log: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            raw_log: raw_log.into(),
            source: source.into(),
            format: LogFormat::Unknown,
        }
    }

    /// Set the format hint
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Validate and normalize the request
    ///
    /// `raw_log` is trimmed and must be non-empty and at most `max_chars`
    /// characters. `source` is trimmed and lowercased; it goes straight into
    /// the prompt, so only `[a-z0-9]` with interior hyphens is allowed.
    pub fn validated(self, max_chars: usize) -> Result<Self> {
        let raw_log = self.raw_log.trim();
        if raw_log.is_empty() {
            return Err(NormalizerError::InvalidRequest(
                "raw_log must not be empty".to_string(),
            ));
        }
        let length = raw_log.chars().count();
        if length > max_chars {
            return Err(NormalizerError::InvalidRequest(format!(
                "raw_log too long ({} chars, max {})",
                length, max_chars
            )));
        }

        let source = self.source.trim().to_lowercase();
        validate_source(&source)?;

        Ok(Self {
            raw_log: raw_log.to_string(),
            source,
            format: self.format,
        })
    }
}

fn validate_source(source: &str) -> Result<()> {
    if source.is_empty() {
        return Err(NormalizerError::InvalidRequest(
            "source must not be empty".to_string(),
        ));
    }

    let allowed = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    let well_formed = source.chars().all(|c| allowed(c) || c == '-')
        && !source.starts_with('-')
        && !source.ends_with('-');

    if well_formed {
        Ok(())
    } else {
        Err(NormalizerError::InvalidRequest(format!(
            "source must be lowercase alphanumeric with interior hyphens only, got '{}'",
            source
        )))
    }
}
