//! Core Normalizer implementation

use crate::assess::Assessor;
use crate::config::NormalizerConfig;
use crate::error::{NormalizerError, Result};
use crate::prompt::PromptBuilder;
use crate::request::NormalizeRequest;
use crate::response::NormalizeResponse;
use lognorm_domain::{ChatMessage, LlmProvider};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Normalizer turns one raw log into a scored, routed record
///
/// ```text
/// request ─► validate ─► prompt ─► provider ─► extract ─► score ─► route
/// ```
pub struct Normalizer<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    assessor: Assessor,
    prompts: PromptBuilder,
    config: NormalizerConfig,
}

impl<L> Normalizer<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new Normalizer
    ///
    /// Fails if the configuration is invalid (including a schema override
    /// or rubric that does not validate).
    pub fn new(llm_provider: L, config: NormalizerConfig) -> Result<Self> {
        let config = config.clamped();
        config.validate().map_err(NormalizerError::Config)?;

        let assessor = Assessor::from_config(&config)?;
        let prompts = PromptBuilder::new(assessor.scorer().schema())
            .with_examples(&config.examples, config.max_examples);

        Ok(Self {
            llm_provider: Arc::new(llm_provider),
            assessor,
            prompts,
            config,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// The assessor used on provider output
    pub fn assessor(&self) -> &Assessor {
        &self.assessor
    }

    /// Normalize one log
    ///
    /// Extraction failure is not an error: it produces a zero-confidence
    /// response routed to manual review. Errors are reserved for invalid
    /// requests, provider failures and timeouts.
    pub async fn normalize(&self, request: NormalizeRequest) -> Result<NormalizeResponse> {
        let started = Instant::now();
        let request = request.validated(self.config.max_raw_log_chars)?;

        info!(
            "Normalizing {} log from '{}' ({} chars)",
            request.format,
            request.source,
            request.raw_log.chars().count()
        );

        let messages = self.prompts.build(&request);
        debug!("Prompt has {} messages", messages.len());

        let raw_output = timeout(self.config.generation_timeout(), self.call_llm(messages))
            .await
            .map_err(|_| NormalizerError::Timeout(self.config.generation_timeout_secs))??;

        debug!("LLM response length: {} chars", raw_output.len());

        let assessment = self.assessor.assess(&raw_output);
        let processing_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let response = NormalizeResponse::from_assessment(
            assessment,
            processing_time_ms,
            self.prompts.examples_used(),
            self.llm_provider.model_name(),
        );

        match &response.error {
            Some(error) => warn!(
                "source={} {} time_ms={}",
                request.source, error, response.processing_time_ms
            ),
            None => info!(
                "source={} confidence={:.3} routing={} time_ms={}",
                request.source, response.confidence, response.routing, response.processing_time_ms
            ),
        }

        Ok(response)
    }

    /// Call the LLM provider on the blocking pool
    async fn call_llm(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let llm = Arc::clone(&self.llm_provider);

        // LlmProvider is synchronous
        tokio::task::spawn_blocking(move || {
            llm.generate(&messages)
                .map_err(|e| NormalizerError::Llm(e.to_string()))
        })
        .await
        .map_err(|e| NormalizerError::Llm(format!("Task join error: {}", e)))?
    }
}
