//! lognorm Conformance Scorer
//!
//! Assigns a deterministic confidence score in [0.0, 1.0] describing how well
//! a recovered record conforms to the OCSF schema reference.
//!
//! # Rubric
//!
//! | Signal | Weight | Awarded when |
//! |--------|--------|--------------|
//! | Base fields | 0.40 | split evenly over each present base field |
//! | Identifier formula | 0.20 | `type_uid == class_uid * 100 + activity_id` (0.10 if `activity_id` is absent) |
//! | Class fields | 0.25 | proportional to the class-specific fields present |
//! | Field types | 0.15 | `class_uid` is a genuine valid integer; -0.05 for a bad `severity_id` |
//! | Invalid class | -0.10 | `class_uid` present but not in the catalog |
//!
//! The weights come from [`lognorm_domain::ScoringRubric`]; the field names,
//! catalog and multiplier come from [`lognorm_domain::SchemaReference`].
//! The scorer never fails: malformed fields simply earn nothing.
//!
//! # Example Usage
//!
//! ```
//! use lognorm_domain::SchemaReference;
//! use lognorm_scorer::score;
//! use serde_json::json;
//!
//! let schema = SchemaReference::ocsf();
//! let record = json!({
//!     "class_uid": 1001,
//!     "class_name": "File System Activity",
//!     "metadata": {"version": "1.1.0"},
//!     "activity_id": 1,
//!     "type_uid": 100101,
//!     "severity_id": 3,
//!     "file": {"name": "example.txt"}
//! });
//!
//! let confidence = score(record.as_object().unwrap(), &schema);
//! assert!((confidence - 1.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]

mod breakdown;
mod coercion;
mod error;
mod scorer;

pub use breakdown::{ConformanceIssue, ScoreBreakdown};
pub use coercion::{is_genuine_integer, resolve_identifier};
pub use error::ScorerError;
pub use scorer::{score, ConformanceScorer};
