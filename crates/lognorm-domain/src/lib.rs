//! lognorm Domain Layer
//!
//! Reference data and value types shared by every other lognorm crate.
//! Nothing in here performs I/O; the only external dependency is `serde`,
//! so the schema reference and scoring rubric can be loaded from configuration.
//!
//! ## Key Concepts
//!
//! - **Schema Reference**: immutable OCSF catalog (classes, severities,
//!   required fields, `type_uid` multiplier), built once and shared read-only
//! - **Scoring Rubric**: the conformance weights and penalties, kept as data
//! - **Routing Decision**: accept vs. manual review against a threshold
//! - **Chat Message / LlmProvider**: the boundary to whatever produces raw output
//!
//! ## Architecture
//!
//! - Pure value types and lookups only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod routing;
pub mod rubric;
pub mod schema;
pub mod traits;

// Re-exports for convenience
pub use routing::{RoutingDecision, DEFAULT_CONFIDENCE_THRESHOLD};
pub use rubric::{IdentifierCoercion, ScoringRubric};
pub use schema::{ClassDefinition, FieldNames, SchemaDefinition, SchemaReference, SeverityLevel};
pub use traits::{ChatMessage, ChatRole, LlmProvider};
