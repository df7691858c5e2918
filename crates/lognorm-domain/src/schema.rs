//! Schema reference module
//!
//! The [`SchemaReference`] is the immutable dataset the conformance scorer
//! reads: valid class identifiers, per-class required fields, base required
//! fields, valid severities and the `type_uid` multiplier. It is constructed
//! once at startup and shared by reference (or `Arc`) afterwards; there is no
//! way to mutate it after construction.
//!
//! [`SchemaDefinition`] is the serializable form used in TOML configuration.

use crate::catalog;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Record keys the scorer inspects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    /// Class identifier key
    #[serde(default = "default_class_id")]
    pub class_id: String,

    /// Activity identifier key
    #[serde(default = "default_activity_id")]
    pub activity_id: String,

    /// Composite identifier key (`class_id * multiplier + activity_id`)
    #[serde(default = "default_composite_id")]
    pub composite_id: String,

    /// Severity key
    #[serde(default = "default_severity")]
    pub severity: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            class_id: default_class_id(),
            activity_id: default_activity_id(),
            composite_id: default_composite_id(),
            severity: default_severity(),
        }
    }
}

fn default_class_id() -> String {
    "class_uid".to_string()
}

fn default_activity_id() -> String {
    "activity_id".to_string()
}

fn default_composite_id() -> String {
    "type_uid".to_string()
}

fn default_severity() -> String {
    "severity_id".to_string()
}

/// One event class in a [`SchemaDefinition`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    /// Class identifier
    pub uid: i64,

    /// Human-readable class label
    pub name: String,

    /// Fields required specifically by this class
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_fields: Vec<String>,
}

/// One severity level in a [`SchemaDefinition`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityLevel {
    /// Severity identifier
    pub id: i64,

    /// Human-readable label
    pub name: String,
}

/// Serializable description of a schema reference
///
/// ```toml
/// base_required_fields = ["class_uid", "class_name", "metadata"]
/// identifier_multiplier = 100
///
/// [[classes]]
/// uid = 1001
/// name = "File System Activity"
/// required_fields = ["file"]
///
/// [[severities]]
/// id = 3
/// name = "Medium"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Fields every record must carry
    pub base_required_fields: Vec<String>,

    /// Multiplier in the composite identifier formula
    pub identifier_multiplier: i64,

    /// Record keys inspected by the scorer
    #[serde(default)]
    pub field_names: FieldNames,

    /// Event class catalog
    pub classes: Vec<ClassDefinition>,

    /// Valid severity levels
    pub severities: Vec<SeverityLevel>,
}

impl Default for SchemaDefinition {
    /// The built-in OCSF catalog
    fn default() -> Self {
        Self {
            base_required_fields: catalog::BASE_REQUIRED_FIELDS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            identifier_multiplier: catalog::TYPE_UID_MULTIPLIER,
            field_names: FieldNames::default(),
            classes: catalog::EVENT_CLASSES
                .iter()
                .map(|(uid, name)| ClassDefinition {
                    uid: *uid,
                    name: name.to_string(),
                    required_fields: catalog::required_fields_for(*uid)
                        .unwrap_or_default()
                        .iter()
                        .map(|f| f.to_string())
                        .collect(),
                })
                .collect(),
            severities: catalog::SEVERITY_LEVELS
                .iter()
                .map(|(id, name)| SeverityLevel {
                    id: *id,
                    name: name.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ClassEntry {
    name: String,
    required_fields: Vec<String>,
}

/// Immutable schema reference consumed by the conformance scorer
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaReference {
    base_required_fields: Vec<String>,
    classes: BTreeMap<i64, ClassEntry>,
    severities: BTreeMap<i64, String>,
    identifier_multiplier: i64,
    field_names: FieldNames,
}

impl SchemaReference {
    /// Build a schema reference from its serializable definition
    ///
    /// Rejects empty catalogs or base field lists, duplicate identifiers,
    /// duplicate base fields and a non-positive multiplier.
    pub fn from_definition(definition: SchemaDefinition) -> Result<Self, String> {
        if definition.identifier_multiplier <= 0 {
            return Err(format!(
                "identifier_multiplier must be positive, got {}",
                definition.identifier_multiplier
            ));
        }
        if definition.classes.is_empty() {
            return Err("schema must declare at least one class".to_string());
        }
        if definition.severities.is_empty() {
            return Err("schema must declare at least one severity".to_string());
        }

        if definition.base_required_fields.is_empty() {
            return Err("schema must declare at least one base required field".to_string());
        }

        let mut seen = BTreeSet::new();
        for field in &definition.base_required_fields {
            if field.is_empty() {
                return Err("base required field names must not be empty".to_string());
            }
            if !seen.insert(field.as_str()) {
                return Err(format!("duplicate base required field '{}'", field));
            }
        }

        let mut uids = BTreeSet::new();
        for class in &definition.classes {
            if !uids.insert(class.uid) {
                return Err(format!("duplicate class uid {}", class.uid));
            }
        }

        let mut ids = BTreeSet::new();
        for level in &definition.severities {
            if !ids.insert(level.id) {
                return Err(format!("duplicate severity id {}", level.id));
            }
        }

        Ok(Self::assemble(definition))
    }

    /// The built-in OCSF 1.x schema reference
    pub fn ocsf() -> Self {
        // Built-in tables are checked by the catalog tests.
        Self::assemble(SchemaDefinition::default())
    }

    fn assemble(definition: SchemaDefinition) -> Self {
        Self {
            base_required_fields: definition.base_required_fields,
            classes: definition
                .classes
                .into_iter()
                .map(|c| {
                    (
                        c.uid,
                        ClassEntry {
                            name: c.name,
                            required_fields: c.required_fields,
                        },
                    )
                })
                .collect(),
            severities: definition
                .severities
                .into_iter()
                .map(|s| (s.id, s.name))
                .collect(),
            identifier_multiplier: definition.identifier_multiplier,
            field_names: definition.field_names,
        }
    }

    /// Convert back into the serializable form
    pub fn to_definition(&self) -> SchemaDefinition {
        SchemaDefinition {
            base_required_fields: self.base_required_fields.clone(),
            identifier_multiplier: self.identifier_multiplier,
            field_names: self.field_names.clone(),
            classes: self
                .classes
                .iter()
                .map(|(uid, entry)| ClassDefinition {
                    uid: *uid,
                    name: entry.name.clone(),
                    required_fields: entry.required_fields.clone(),
                })
                .collect(),
            severities: self
                .severities
                .iter()
                .map(|(id, name)| SeverityLevel {
                    id: *id,
                    name: name.clone(),
                })
                .collect(),
        }
    }

    /// Fields every valid record must carry
    pub fn base_required_fields(&self) -> &[String] {
        &self.base_required_fields
    }

    /// Whether `class_id` is a member of the valid class identifiers
    pub fn is_valid_class(&self, class_id: i64) -> bool {
        self.classes.contains_key(&class_id)
    }

    /// Human label for a class identifier
    pub fn class_label(&self, class_id: i64) -> Option<&str> {
        self.classes.get(&class_id).map(|c| c.name.as_str())
    }

    /// Fields specifically required by a valid class
    ///
    /// Returns `None` for unknown classes and an empty slice for classes
    /// without specific requirements.
    pub fn class_required_fields(&self, class_id: i64) -> Option<&[String]> {
        self.classes
            .get(&class_id)
            .map(|c| c.required_fields.as_slice())
    }

    /// Iterate over `(uid, label)` in ascending uid order
    pub fn classes(&self) -> impl Iterator<Item = (i64, &str)> {
        self.classes.iter().map(|(uid, c)| (*uid, c.name.as_str()))
    }

    /// Number of valid classes
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Whether `severity` lies in the severity range
    pub fn is_valid_severity(&self, severity: i64) -> bool {
        self.severities.contains_key(&severity)
    }

    /// Human label for a severity identifier
    pub fn severity_label(&self, severity: i64) -> Option<&str> {
        self.severities.get(&severity).map(String::as_str)
    }

    /// Iterate over `(id, label)` in ascending id order
    pub fn severities(&self) -> impl Iterator<Item = (i64, &str)> {
        self.severities.iter().map(|(id, name)| (*id, name.as_str()))
    }

    /// Multiplier in `composite = class * multiplier + activity`
    pub fn identifier_multiplier(&self) -> i64 {
        self.identifier_multiplier
    }

    /// Expected composite identifier for a class/activity pair
    ///
    /// `None` when the arithmetic would overflow.
    pub fn composite_id(&self, class_id: i64, activity_id: i64) -> Option<i64> {
        class_id
            .checked_mul(self.identifier_multiplier)
            .and_then(|base| base.checked_add(activity_id))
    }

    /// Record keys inspected by the scorer
    pub fn field_names(&self) -> &FieldNames {
        &self.field_names
    }
}

impl Default for SchemaReference {
    fn default() -> Self {
        Self::ocsf()
    }
}
