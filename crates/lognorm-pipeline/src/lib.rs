//! lognorm Pipeline
//!
//! Turns one raw log line into a scored, routed OCSF record.
//!
//! # Architecture
//!
//! ```text
//! NormalizeRequest → validate → PromptBuilder → LlmProvider
//!                  → RecoveryParser → ConformanceScorer → RoutingDecision
//! ```
//!
//! The provider call is the only asynchronous step; it runs on the blocking
//! pool under a configurable timeout. Extraction and scoring are pure and
//! are also available on their own through [`Assessor`].
//!
//! # Example Usage
//!
//! ```
//! use lognorm_domain::RoutingDecision;
//! use lognorm_llm::MockProvider;
//! use lognorm_pipeline::{LogFormat, NormalizeRequest, Normalizer, NormalizerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new("```json\n{\"class_uid\": 4001}\n```");
//! let normalizer = Normalizer::new(llm, NormalizerConfig::default())?;
//!
//! let request = NormalizeRequest::new("src=10.0.0.1 dst=10.0.0.2 act=allow", "palo-alto")
//!     .with_format(LogFormat::Cef);
//! let response = normalizer.normalize(request).await?;
//!
//! assert_eq!(response.ocsf["class_uid"], 4001);
//! assert_eq!(response.routing, RoutingDecision::ManualReview);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod assess;
mod config;
mod error;
mod normalizer;
mod prompt;
mod request;
mod response;

#[cfg(test)]
mod tests;

pub use assess::{Assessment, Assessor};
pub use config::{NormalizerConfig, DEFAULT_MAX_RAW_LOG_CHARS};
pub use error::{NormalizerError, Result};
pub use normalizer::Normalizer;
pub use prompt::{log_message, FewShotExample, PromptBuilder};
pub use request::{LogFormat, NormalizeRequest};
pub use response::NormalizeResponse;
