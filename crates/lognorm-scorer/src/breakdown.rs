//! Per-signal score breakdown

use serde::Serialize;

/// Something the scorer noticed while grading a record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ConformanceIssue {
    /// A base required field is missing or null
    MissingBaseField {
        /// Field name
        field: String,
    },

    /// The class identifier is missing or null
    MissingClassId,

    /// The class identifier does not resolve to a catalog entry
    UnknownClass {
        /// Raw value as it appeared in the record
        value: String,
    },

    /// The class identifier resolved but is not a JSON integer
    ClassIdNotInteger,

    /// A class-specific required field is missing or null
    MissingClassField {
        /// Field name
        field: String,
    },

    /// The activity identifier is missing or null
    MissingActivityId,

    /// The composite identifier does not follow the formula
    CompositeMismatch {
        /// Value implied by class and activity, when computable
        expected: Option<i64>,
        /// Raw value as it appeared in the record
        actual: String,
    },

    /// The severity is present but not a valid integer code
    InvalidSeverity {
        /// Raw value as it appeared in the record
        value: String,
    },
}

impl std::fmt::Display for ConformanceIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConformanceIssue::MissingBaseField { field } => {
                write!(f, "missing base field '{}'", field)
            }
            ConformanceIssue::MissingClassId => write!(f, "missing class identifier"),
            ConformanceIssue::UnknownClass { value } => {
                write!(f, "class identifier {} is not in the catalog", value)
            }
            ConformanceIssue::ClassIdNotInteger => {
                write!(f, "class identifier is not an integer")
            }
            ConformanceIssue::MissingClassField { field } => {
                write!(f, "missing class field '{}'", field)
            }
            ConformanceIssue::MissingActivityId => write!(f, "missing activity identifier"),
            ConformanceIssue::CompositeMismatch { expected, actual } => match expected {
                Some(expected) => write!(f, "composite identifier {} != expected {}", actual, expected),
                None => write!(f, "composite identifier {} cannot be checked", actual),
            },
            ConformanceIssue::InvalidSeverity { value } => {
                write!(f, "severity {} is not a valid severity level", value)
            }
        }
    }
}

/// Contribution of each rubric signal to the final score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Base-fields signal
    pub base_fields: f64,

    /// Identifier-formula signal
    pub identifier: f64,

    /// Class-required-fields signal
    pub class_fields: f64,

    /// Field-type-correctness signal
    pub field_types: f64,

    /// Invalid-class penalty (non-negative; subtracted)
    pub penalty: f64,

    /// `clamp(signals - penalty, 0, 1)`
    pub total: f64,

    /// Resolved class identifier, if any
    pub class_id: Option<i64>,

    /// Catalog label of the resolved class, if valid
    pub class_label: Option<String>,

    /// What cost the record points
    pub issues: Vec<ConformanceIssue>,
}

impl ScoreBreakdown {
    /// Sum of the four signals before the penalty and clamping
    pub fn signal_sum(&self) -> f64 {
        self.base_fields + self.identifier + self.class_fields + self.field_types
    }

    /// Whether the record earned every point
    pub fn is_perfect(&self) -> bool {
        self.issues.is_empty() && self.penalty == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_display() {
        let issue = ConformanceIssue::CompositeMismatch {
            expected: Some(100101),
            actual: "999999".to_string(),
        };
        assert_eq!(issue.to_string(), "composite identifier 999999 != expected 100101");

        let issue = ConformanceIssue::MissingBaseField {
            field: "metadata".to_string(),
        };
        assert_eq!(issue.to_string(), "missing base field 'metadata'");
    }

    #[test]
    fn test_invalid_severity_display() {
        let issue = ConformanceIssue::InvalidSeverity {
            value: "\"high\"".to_string(),
        };
        assert_eq!(issue.to_string(), r#"severity "high" is not a valid severity level"#);
    }

    #[test]
    fn test_issue_serializes_with_tag() {
        let value = serde_json::to_value(ConformanceIssue::MissingClassId).unwrap();
        assert_eq!(value["issue"], "missing_class_id");
    }
}
