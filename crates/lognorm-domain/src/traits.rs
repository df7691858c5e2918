//! Trait definitions for external interactions
//!
//! These traits define the boundary between normalization logic and whatever
//! produces the raw model output. Implementations live in other crates.

use serde::{Deserialize, Serialize};

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions for the model
    System,
    /// Input turn
    User,
    /// Model turn (used for few-shot examples)
    Assistant,
}

/// One message of a chat-style prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Speaker
    pub role: ChatRole,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// System message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (lognorm-llm). The normalizer only
/// sees the raw text returned; it never assumes the output is well-formed.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a completion for a chat prompt
    fn generate(&self, messages: &[ChatMessage]) -> Result<String, Self::Error>;

    /// Name of the model behind this provider
    fn model_name(&self) -> &str {
        "llm"
    }
}
