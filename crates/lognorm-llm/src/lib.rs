//! lognorm LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `lognorm-domain`.
//! Hosting or calling a real model is out of scope for lognorm; this crate
//! carries the deterministic provider used by tests, demos and the CLI.
//!
//! # Providers
//!
//! - `MockProvider`: canned replies keyed by the final user message
//!
//! # Examples
//!
//! ```
//! use lognorm_domain::{ChatMessage, LlmProvider};
//! use lognorm_llm::MockProvider;
//!
//! let provider = MockProvider::new(r#"{"class_uid": 1001}"#);
//! let reply = provider.generate(&[ChatMessage::user("any log line")]).unwrap();
//! assert_eq!(reply, r#"{"class_uid": 1001}"#);
//! ```

#![warn(missing_docs)]

use lognorm_domain::{ChatMessage, ChatRole, LlmProvider};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Communication with the model failed
    #[error("Communication error: {0}")]
    Communication(String),

    /// The prompt contained no user message
    #[error("Prompt has no user message")]
    EmptyPrompt,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),
}

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fail(LlmError),
}

/// Mock LLM provider for deterministic testing
///
/// Replies are looked up by the last user message in the prompt: an exact
/// match wins, otherwise the longest registered key the message ends with.
/// Unmatched prompts get the default reply. Clones share replies and the
/// call counter.
///
/// ```
/// use lognorm_domain::{ChatMessage, LlmProvider};
/// use lognorm_llm::MockProvider;
///
/// let provider = MockProvider::default();
/// provider.add_response("ssh login", r#"{"class_uid": 3002}"#);
///
/// let reply = provider.generate(&[ChatMessage::user("ssh login")]).unwrap();
/// assert_eq!(reply, r#"{"class_uid": 3002}"#);
/// assert_eq!(provider.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    model: String,
    default_reply: String,
    replies: Arc<Mutex<HashMap<String, Reply>>>,
    call_count: Arc<Mutex<usize>>,
    latency: Option<Duration>,
}

impl MockProvider {
    /// Create a provider that answers every prompt with `reply`
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            model: "mock".to_string(),
            default_reply: reply.into(),
            replies: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            latency: None,
        }
    }

    /// Set the reported model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Block for `latency` on every call (simulates a slow model)
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Reply with `response` when the last user message ends with `log`
    pub fn add_response(&self, log: impl Into<String>, response: impl Into<String>) {
        lock(&self.replies).insert(log.into(), Reply::Text(response.into()));
    }

    /// Fail with `error` when the last user message ends with `log`
    pub fn add_error(&self, log: impl Into<String>, error: LlmError) {
        lock(&self.replies).insert(log.into(), Reply::Fail(error));
    }

    /// Number of times `generate` was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn generate(&self, messages: &[ChatMessage]) -> Result<String, Self::Error> {
        *lock(&self.call_count) += 1;

        if let Some(latency) = self.latency {
            std::thread::sleep(latency);
        }

        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .ok_or(LlmError::EmptyPrompt)?;

        debug!(
            "Mock generation for {} message(s), last user message {} chars",
            messages.len(),
            last_user.content.len()
        );

        let replies = lock(&self.replies);
        let reply = replies.get(&last_user.content).or_else(|| {
            replies
                .iter()
                .filter(|(key, _)| last_user.content.ends_with(key.as_str()))
                .max_by_key(|(key, _)| key.len())
                .map(|(_, reply)| reply)
        });

        match reply {
            Some(Reply::Text(text)) => Ok(text.clone()),
            Some(Reply::Fail(error)) => Err(error.clone()),
            None => Ok(self.default_reply.clone()),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// A panicking test thread must not wedge every other user of the mock.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
