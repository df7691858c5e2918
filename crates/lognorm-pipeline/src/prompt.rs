//! Chat prompt construction for log normalization

use crate::request::{LogFormat, NormalizeRequest};
use lognorm_domain::{ChatMessage, SchemaReference};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A worked example shown to the model before the real log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FewShotExample {
    /// Example raw log
    pub raw_log: String,

    /// Product that produced it
    pub source: String,

    /// Its format
    #[serde(default)]
    pub format: LogFormat,

    /// The expected normalized record
    pub ocsf: Value,
}

/// Builds chat prompts for the model
///
/// The schema facts quoted in the instructions (base fields, composite
/// formula, severity codes) are taken from the schema reference, so a
/// custom schema produces matching instructions.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    base_fields: Vec<String>,
    class_key: String,
    activity_key: String,
    composite_key: String,
    multiplier: i64,
    severities: Vec<(i64, String)>,
    examples: Vec<FewShotExample>,
}

impl PromptBuilder {
    /// Create a prompt builder for a schema reference
    pub fn new(schema: &SchemaReference) -> Self {
        let names = schema.field_names();
        Self {
            base_fields: schema.base_required_fields().to_vec(),
            class_key: names.class_id.clone(),
            activity_key: names.activity_id.clone(),
            composite_key: names.composite_id.clone(),
            multiplier: schema.identifier_multiplier(),
            severities: schema
                .severities()
                .map(|(id, label)| (id, label.to_string()))
                .collect(),
            examples: Vec::new(),
        }
    }

    /// Add few-shot examples, keeping at most `limit`
    pub fn with_examples(mut self, examples: &[FewShotExample], limit: usize) -> Self {
        self.examples = examples.iter().take(limit).cloned().collect();
        self
    }

    /// Number of few-shot examples placed in every prompt
    pub fn examples_used(&self) -> usize {
        self.examples.len()
    }

    /// Build the complete chat prompt for a validated request
    ///
    /// Layout: system instructions, then one user/assistant pair per
    /// example, then the log itself as the final user message.
    pub fn build(&self, request: &NormalizeRequest) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2 + self.examples.len() * 2);

        // 1. Instructions
        messages.push(ChatMessage::system(
            self.instructions(&request.source, request.format),
        ));

        // 2. Few-shot examples
        for example in &self.examples {
            messages.push(ChatMessage::user(format!(
                "Normalize this {} log formatted in {} format: {}",
                example.source, example.format, example.raw_log
            )));
            messages.push(ChatMessage::assistant(example.ocsf.to_string()));
        }

        // 3. The log to normalize
        messages.push(log_message(&request.raw_log));

        messages
    }

    fn instructions(&self, source: &str, format: LogFormat) -> String {
        let severities = self
            .severities
            .iter()
            .map(|(id, label)| format!("{}={}", id, label))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "You are a log normalizer. Normalize the given log produced by {source} in {format} \
             format to OCSF (Open Cybersecurity Schema Framework).\n\
             Instructions:\n\
             - Return ONLY valid JSON. No explanation. No markdown. No code fences.\n\
             - Begin your response with an opening curly bracket and end with a closing curly bracket.\n\
             - Place vendor-specific fields with no OCSF equivalent in an \"unmapped\" object. \
             Never invent OCSF field names.\n\
             - Required base fields: {base}\n\
             - {composite} = {class} * {multiplier} + {activity}\n\
             - severity_id values: {severities}",
            source = source,
            format = format,
            base = self.base_fields.join(", "),
            composite = self.composite_key,
            class = self.class_key,
            multiplier = self.multiplier,
            activity = self.activity_key,
            severities = severities,
        )
    }
}

/// The final user message carrying the log
pub fn log_message(raw_log: &str) -> ChatMessage {
    ChatMessage::user(format!("Log to normalize:\n{}", raw_log))
}
