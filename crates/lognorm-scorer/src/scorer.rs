//! Conformance scoring logic

use crate::breakdown::{ConformanceIssue, ScoreBreakdown};
use crate::coercion::{is_genuine_integer, resolve_identifier};
use crate::error::ScorerError;
use lognorm_domain::routing::clamp_unit;
use lognorm_domain::{IdentifierCoercion, SchemaDefinition, SchemaReference, ScoringRubric};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Scores records against a shared schema reference
///
/// Cheap to clone; the schema is shared through an `Arc` and never mutated.
#[derive(Debug, Clone)]
pub struct ConformanceScorer {
    schema: Arc<SchemaReference>,
    rubric: ScoringRubric,
}

impl ConformanceScorer {
    /// Create a scorer with the default rubric
    pub fn new(schema: Arc<SchemaReference>) -> Self {
        Self {
            schema,
            rubric: ScoringRubric::default(),
        }
    }

    /// Create a scorer with a custom rubric
    pub fn with_rubric(
        schema: Arc<SchemaReference>,
        rubric: ScoringRubric,
    ) -> Result<Self, ScorerError> {
        rubric.validate().map_err(ScorerError::InvalidRubric)?;
        Ok(Self { schema, rubric })
    }

    /// Create a scorer from a schema definition and rubric
    pub fn from_definition(
        definition: SchemaDefinition,
        rubric: ScoringRubric,
    ) -> Result<Self, ScorerError> {
        let schema = SchemaReference::from_definition(definition)
            .map_err(ScorerError::InvalidSchema)?;
        Self::with_rubric(Arc::new(schema), rubric)
    }

    /// Scorer over the built-in OCSF catalog
    pub fn ocsf() -> Self {
        Self::new(Arc::new(SchemaReference::ocsf()))
    }

    /// The schema reference in use
    pub fn schema(&self) -> &SchemaReference {
        &self.schema
    }

    /// The rubric in use
    pub fn rubric(&self) -> &ScoringRubric {
        &self.rubric
    }

    /// Confidence score in [0.0, 1.0]
    pub fn score(&self, record: &Map<String, Value>) -> f64 {
        self.breakdown(record).total
    }

    /// Per-signal contributions and the issues found
    pub fn breakdown(&self, record: &Map<String, Value>) -> ScoreBreakdown {
        evaluate(record, &self.schema, &self.rubric)
    }
}

/// Score a record against a schema reference with the default rubric
pub fn score(record: &Map<String, Value>, schema: &SchemaReference) -> f64 {
    evaluate(record, schema, &ScoringRubric::default()).total
}

fn field<'a>(record: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    record.get(name).filter(|v| !v.is_null())
}

fn evaluate(
    record: &Map<String, Value>,
    schema: &SchemaReference,
    rubric: &ScoringRubric,
) -> ScoreBreakdown {
    let names = schema.field_names();
    let mut issues = Vec::new();

    // 1. Base fields: each present (non-null) field earns an equal share
    let base_required = schema.base_required_fields();
    let mut base_present = 0usize;
    for name in base_required {
        if field(record, name).is_some() {
            base_present += 1;
        } else {
            issues.push(ConformanceIssue::MissingBaseField {
                field: name.clone(),
            });
        }
    }
    let base_fields = if base_required.is_empty() {
        0.0
    } else {
        rubric.base_fields_weight * (base_present as f64 / base_required.len() as f64)
    };

    // Resolve the class identifier once; every later signal depends on it
    let raw_class = field(record, &names.class_id);
    let class_id = raw_class.and_then(|v| resolve_identifier(v, rubric.coercion));
    let valid_class = class_id.filter(|id| schema.is_valid_class(*id));
    match (raw_class, valid_class) {
        (None, _) => issues.push(ConformanceIssue::MissingClassId),
        (Some(raw), None) => issues.push(ConformanceIssue::UnknownClass {
            value: raw.to_string(),
        }),
        (Some(_), Some(_)) => {}
    }

    // 2. Identifier formula
    let identifier = match valid_class {
        Some(class_id) => identifier_signal(record, schema, rubric, class_id, &mut issues),
        None => 0.0,
    };

    // 3. Class-specific required fields
    let class_fields = match valid_class.and_then(|id| schema.class_required_fields(id)) {
        None => 0.0,
        Some([]) => rubric.class_fields_weight,
        Some(required) => {
            let mut present = 0usize;
            for name in required {
                if field(record, name).is_some() {
                    present += 1;
                } else {
                    issues.push(ConformanceIssue::MissingClassField {
                        field: name.clone(),
                    });
                }
            }
            rubric.class_fields_weight * (present as f64 / required.len() as f64)
        }
    };

    // 4. Field types: only for a genuine integer member of the catalog
    let field_types = match (valid_class, raw_class) {
        (Some(_), Some(raw)) if is_genuine_integer(raw) => {
            let mut signal = rubric.field_types_weight;
            if let Some(severity) = field(record, &names.severity) {
                let valid = is_genuine_integer(severity)
                    && resolve_identifier(severity, IdentifierCoercion::Strict)
                        .is_some_and(|s| schema.is_valid_severity(s));
                if !valid {
                    signal -= rubric.severity_penalty;
                    issues.push(ConformanceIssue::InvalidSeverity {
                        value: severity.to_string(),
                    });
                }
            }
            signal.max(0.0)
        }
        (Some(_), Some(_)) => {
            issues.push(ConformanceIssue::ClassIdNotInteger);
            0.0
        }
        _ => 0.0,
    };

    // Penalty: a class identifier is present but resolves to nothing valid
    let penalty = if raw_class.is_some() && valid_class.is_none() {
        rubric.invalid_class_penalty
    } else {
        0.0
    };

    let signals = base_fields + identifier + class_fields + field_types;
    let total = clamp_unit(signals - penalty);

    debug!(
        "Conformance score {:.3} (base {:.3}, identifier {:.3}, class {:.3}, types {:.3}, penalty {:.3})",
        total, base_fields, identifier, class_fields, field_types, penalty
    );

    ScoreBreakdown {
        base_fields,
        identifier,
        class_fields,
        field_types,
        penalty,
        total,
        class_id,
        class_label: valid_class
            .and_then(|id| schema.class_label(id))
            .map(str::to_string),
        issues,
    }
}

fn identifier_signal(
    record: &Map<String, Value>,
    schema: &SchemaReference,
    rubric: &ScoringRubric,
    class_id: i64,
    issues: &mut Vec<ConformanceIssue>,
) -> f64 {
    let names = schema.field_names();

    let Some(raw_activity) = field(record, &names.activity_id) else {
        // Some classes legitimately omit the activity
        issues.push(ConformanceIssue::MissingActivityId);
        return rubric.identifier_weight * rubric.missing_activity_credit;
    };

    let expected = resolve_identifier(raw_activity, rubric.coercion)
        .and_then(|activity_id| schema.composite_id(class_id, activity_id));
    let raw_composite = field(record, &names.composite_id);
    let actual = raw_composite.and_then(|v| resolve_identifier(v, rubric.coercion));

    if expected.is_some() && actual == expected {
        rubric.identifier_weight
    } else {
        issues.push(ConformanceIssue::CompositeMismatch {
            expected,
            actual: raw_composite.map_or_else(|| "null".to_string(), Value::to_string),
        });
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test records must be objects"),
        }
    }

    fn perfect_file_activity() -> Map<String, Value> {
        record(json!({
            "class_uid": 1001,
            "class_name": "File System Activity",
            "metadata": {"timestamp": "2024-01-01T00:00:00Z"},
            "severity_id": 3,
            "activity_id": 1,
            "type_uid": 100101,
            "file": "example.txt"
        }))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_record_scores_zero() {
        let schema = SchemaReference::ocsf();
        assert_eq!(score(&Map::new(), &schema), 0.0);
    }

    #[test]
    fn test_perfect_record_scores_one() {
        let scorer = ConformanceScorer::ocsf();
        let breakdown = scorer.breakdown(&perfect_file_activity());
        assert!(approx(breakdown.total, 1.0), "got {}", breakdown.total);
        assert!(breakdown.is_perfect());
        assert_eq!(breakdown.class_label.as_deref(), Some("File System Activity"));
    }

    #[test]
    fn test_unknown_severity_zero_is_still_valid() {
        let mut r = perfect_file_activity();
        r.insert("severity_id".to_string(), json!(0));
        assert!(approx(ConformanceScorer::ocsf().score(&r), 1.0));
    }

    #[test]
    fn test_unknown_class_is_penalized() {
        let r = record(json!({
            "class_uid": 9999,
            "class_name": "Unknown Activity",
            "metadata": {"timestamp": "2024-01-01T00:00:00Z"},
            "severity_id": 3,
            "activity_id": 1,
            "type_uid": 999901
        }));
        let breakdown = ConformanceScorer::ocsf().breakdown(&r);
        assert!(approx(breakdown.base_fields, 0.40));
        assert_eq!(breakdown.identifier, 0.0);
        assert_eq!(breakdown.class_fields, 0.0);
        assert_eq!(breakdown.field_types, 0.0);
        assert!(approx(breakdown.penalty, 0.10));
        assert!(approx(breakdown.total, 0.30));
        assert!(breakdown
            .issues
            .contains(&ConformanceIssue::UnknownClass { value: "9999".to_string() }));
    }

    #[test]
    fn test_wrong_composite_loses_identifier_signal() {
        let mut r = perfect_file_activity();
        r.insert("type_uid".to_string(), json!(999999));
        let breakdown = ConformanceScorer::ocsf().breakdown(&r);
        assert_eq!(breakdown.identifier, 0.0);
        assert!(approx(breakdown.total, 0.80));
        assert!(breakdown.issues.contains(&ConformanceIssue::CompositeMismatch {
            expected: Some(100101),
            actual: "999999".to_string(),
        }));
    }

    #[test]
    fn test_missing_activity_earns_partial_credit() {
        let mut r = perfect_file_activity();
        r.remove("activity_id");
        r.remove("type_uid");
        let breakdown = ConformanceScorer::ocsf().breakdown(&r);
        assert!(approx(breakdown.identifier, 0.10));
        assert!(approx(breakdown.total, 0.90));
    }

    #[test]
    fn test_null_activity_counts_as_absent() {
        let mut r = perfect_file_activity();
        r.insert("activity_id".to_string(), Value::Null);
        assert!(approx(ConformanceScorer::ocsf().breakdown(&r).identifier, 0.10));
    }

    #[test]
    fn test_class_fields_proportional() {
        let r = record(json!({
            "class_uid": 4001,
            "class_name": "Network Activity",
            "metadata": {},
            "activity_id": 5,
            "type_uid": 400105,
            "src_endpoint": {"ip": "10.0.0.1"}
        }));
        let breakdown = ConformanceScorer::ocsf().breakdown(&r);
        assert!(approx(breakdown.class_fields, 0.125));
        assert!(breakdown.issues.contains(&ConformanceIssue::MissingClassField {
            field: "dst_endpoint".to_string()
        }));
    }

    #[test]
    fn test_class_without_specific_fields_gets_full_weight() {
        let r = record(json!({
            "class_uid": 6003,
            "class_name": "API Activity",
            "metadata": {},
            "activity_id": 1,
            "type_uid": 600301
        }));
        let breakdown = ConformanceScorer::ocsf().breakdown(&r);
        assert!(approx(breakdown.class_fields, 0.25));
        assert!(approx(breakdown.total, 1.0));
    }

    #[test]
    fn test_string_class_id_zeroes_type_signal_only() {
        let mut r = perfect_file_activity();
        r.insert("class_uid".to_string(), json!("1001"));
        let breakdown = ConformanceScorer::ocsf().breakdown(&r);
        assert_eq!(breakdown.class_id, Some(1001));
        assert!(approx(breakdown.identifier, 0.20));
        assert!(approx(breakdown.class_fields, 0.25));
        assert_eq!(breakdown.field_types, 0.0);
        assert_eq!(breakdown.penalty, 0.0);
        assert!(breakdown.issues.contains(&ConformanceIssue::ClassIdNotInteger));
    }

    #[test]
    fn test_strict_coercion_treats_string_class_as_invalid() {
        let scorer =
            ConformanceScorer::with_rubric(Arc::new(SchemaReference::ocsf()), ScoringRubric::strict())
                .unwrap();
        let mut r = perfect_file_activity();
        r.insert("class_uid".to_string(), json!("1001"));
        let breakdown = scorer.breakdown(&r);
        assert_eq!(breakdown.class_id, None);
        assert!(approx(breakdown.penalty, 0.10));
        assert!(approx(breakdown.total, 0.30));
    }

    #[test]
    fn test_non_numeric_class_id_is_penalized() {
        let r = record(json!({"class_uid": "network", "class_name": "x", "metadata": {}}));
        let breakdown = ConformanceScorer::ocsf().breakdown(&r);
        assert_eq!(breakdown.class_id, None);
        assert!(approx(breakdown.total, 0.30));
    }

    #[test]
    fn test_out_of_range_severity_is_deducted_not_zeroed() {
        let mut with_bad = perfect_file_activity();
        with_bad.insert("severity_id".to_string(), json!(42));
        let mut without = perfect_file_activity();
        without.remove("severity_id");

        let scorer = ConformanceScorer::ocsf();
        let bad = scorer.breakdown(&with_bad);
        let none = scorer.breakdown(&without);
        assert!(bad.total < none.total);
        assert!(approx(bad.field_types, 0.10));
        assert!(approx(none.field_types, 0.15));
    }

    #[test]
    fn test_string_severity_is_deducted() {
        let mut r = perfect_file_activity();
        r.insert("severity_id".to_string(), json!("3"));
        assert!(approx(ConformanceScorer::ocsf().breakdown(&r).field_types, 0.10));
    }

    #[test]
    fn test_invalid_rubric_rejected() {
        let rubric = ScoringRubric {
            identifier_weight: 0.9,
            ..ScoringRubric::default()
        };
        let result = ConformanceScorer::with_rubric(Arc::new(SchemaReference::ocsf()), rubric);
        assert!(matches!(result, Err(ScorerError::InvalidRubric(_))));
    }

    #[test]
    fn test_invalid_schema_rejected() {
        let mut definition = SchemaDefinition::default();
        definition.classes.clear();
        let result = ConformanceScorer::from_definition(definition, ScoringRubric::default());
        assert!(matches!(result, Err(ScorerError::InvalidSchema(_))));
    }
}
