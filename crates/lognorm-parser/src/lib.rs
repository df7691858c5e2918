//! lognorm Recovery Parser
//!
//! Recovers a structured record from raw language-model output.
//!
//! # Overview
//!
//! Model output is untrusted text: it may be clean JSON, JSON wrapped in a
//! markdown fence, JSON surrounded by prose, Python-style dict literals, or
//! output that was cut off mid-object. The parser never fails: every input
//! resolves to an [`ExtractionOutcome`], either a JSON object or a `Failure`.
//!
//! # Strategy chain
//!
//! ```text
//! raw text ─► DirectParse ─► FencedBlock ─► BalancedBraces ─► WholeText ─► Failure
//!               (first candidate that parses as a JSON object wins)
//! ```
//!
//! Each step is a [`CandidateStrategy`]; a [`RecoveryParser`] holds them in
//! order, and new heuristics are appended without touching existing ones.
//!
//! # Example Usage
//!
//! ```
//! use lognorm_parser::{extract, ExtractionOutcome};
//!
//! let outcome = extract("Here is the log: ```json\n{\"key\":\"value\"}\n```");
//! let record = outcome.into_record().unwrap();
//! assert_eq!(record["key"], "value");
//!
//! assert!(matches!(extract("   "), ExtractionOutcome::Failure(_)));
//! ```

#![warn(missing_docs)]

mod lenient;
mod outcome;
mod parser;
pub mod strategy;

pub use lenient::repair_python_literal;
pub use outcome::{ExtractionOutcome, FailureKind, StructuredRecord};
pub use parser::{extract, is_truncated, RecoveryParser};
pub use strategy::{BalancedBraces, CandidateStrategy, DirectParse, FencedBlock, WholeText};
