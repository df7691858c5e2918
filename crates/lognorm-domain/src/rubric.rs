//! Conformance scoring rubric
//!
//! The weights and penalties of the conformance score live here as data so
//! that tuning them never touches scoring logic.

use serde::{Deserialize, Serialize};

/// Weight of the base-fields signal
pub const BASE_FIELDS_WEIGHT: f64 = 0.40;

/// Weight of the identifier-formula signal
pub const IDENTIFIER_WEIGHT: f64 = 0.20;

/// Weight of the class-required-fields signal
pub const CLASS_FIELDS_WEIGHT: f64 = 0.25;

/// Weight of the field-type-correctness signal
pub const FIELD_TYPES_WEIGHT: f64 = 0.15;

/// Deduction for a present but invalid severity
pub const SEVERITY_PENALTY: f64 = 0.05;

/// Deduction for a class identifier outside the catalog
pub const INVALID_CLASS_PENALTY: f64 = 0.10;

/// Share of the identifier weight awarded when the activity id is absent
pub const MISSING_ACTIVITY_CREDIT: f64 = 0.5;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// How loosely-typed identifiers are turned into integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierCoercion {
    /// Integers, integral floats and numeric strings all resolve
    #[default]
    Lenient,
    /// Only genuine JSON integers resolve
    Strict,
}

/// Weights and penalties applied by the conformance scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRubric {
    /// Base-fields signal weight
    pub base_fields_weight: f64,

    /// Identifier-formula signal weight
    pub identifier_weight: f64,

    /// Class-required-fields signal weight
    pub class_fields_weight: f64,

    /// Field-type-correctness signal weight
    pub field_types_weight: f64,

    /// Deduction inside the field-type signal for an invalid severity
    pub severity_penalty: f64,

    /// Deduction from the total for an unresolvable class identifier
    pub invalid_class_penalty: f64,

    /// Fraction of `identifier_weight` awarded when the activity id is absent
    pub missing_activity_credit: f64,

    /// Coercion policy for identifier fields
    pub coercion: IdentifierCoercion,
}

impl Default for ScoringRubric {
    fn default() -> Self {
        Self {
            base_fields_weight: BASE_FIELDS_WEIGHT,
            identifier_weight: IDENTIFIER_WEIGHT,
            class_fields_weight: CLASS_FIELDS_WEIGHT,
            field_types_weight: FIELD_TYPES_WEIGHT,
            severity_penalty: SEVERITY_PENALTY,
            invalid_class_penalty: INVALID_CLASS_PENALTY,
            missing_activity_credit: MISSING_ACTIVITY_CREDIT,
            coercion: IdentifierCoercion::Lenient,
        }
    }
}

impl ScoringRubric {
    /// Same weights, strict identifier typing
    pub fn strict() -> Self {
        Self {
            coercion: IdentifierCoercion::Strict,
            ..Self::default()
        }
    }

    /// Sum of the four signal weights
    pub fn signal_weight_sum(&self) -> f64 {
        self.base_fields_weight
            + self.identifier_weight
            + self.class_fields_weight
            + self.field_types_weight
    }

    /// Validate the rubric
    ///
    /// Every weight must be finite and non-negative, the four signal weights
    /// must sum to 1.0, the severity penalty cannot exceed the field-type
    /// weight and the missing-activity credit is a fraction.
    pub fn validate(&self) -> Result<(), String> {
        let named = [
            ("base_fields_weight", self.base_fields_weight),
            ("identifier_weight", self.identifier_weight),
            ("class_fields_weight", self.class_fields_weight),
            ("field_types_weight", self.field_types_weight),
            ("severity_penalty", self.severity_penalty),
            ("invalid_class_penalty", self.invalid_class_penalty),
            ("missing_activity_credit", self.missing_activity_credit),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number, got {}", name, value));
            }
        }

        let sum = self.signal_weight_sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(format!("signal weights must sum to 1.0, got {}", sum));
        }
        if self.severity_penalty > self.field_types_weight {
            return Err("severity_penalty cannot exceed field_types_weight".to_string());
        }
        if self.missing_activity_credit > 1.0 {
            return Err("missing_activity_credit must be within [0.0, 1.0]".to_string());
        }
        Ok(())
    }
}
