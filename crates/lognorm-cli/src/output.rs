//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use lognorm_domain::{ChatMessage, ChatRole, RoutingDecision, SchemaReference};
use lognorm_parser::ExtractionOutcome;
use lognorm_pipeline::Assessment;
use lognorm_scorer::ScoreBreakdown;
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an extraction outcome.
    pub fn format_outcome(&self, outcome: &ExtractionOutcome) -> Result<String> {
        match (self.format, outcome) {
            (OutputFormat::Json, ExtractionOutcome::Success(record)) => Ok(
                serde_json::to_string_pretty(&json!({"success": true, "record": record}))?,
            ),
            (OutputFormat::Json, ExtractionOutcome::Failure(kind)) => Ok(
                serde_json::to_string_pretty(&json!({"success": false, "failure": kind}))?,
            ),
            (OutputFormat::Quiet, ExtractionOutcome::Success(record)) => {
                Ok(serde_json::to_string(record)?)
            }
            (OutputFormat::Quiet, ExtractionOutcome::Failure(kind)) => Ok(kind.to_string()),
            (OutputFormat::Table, ExtractionOutcome::Success(record)) => {
                Ok(serde_json::to_string_pretty(record)?)
            }
            (OutputFormat::Table, ExtractionOutcome::Failure(kind)) => {
                Ok(self.error(&format!("No record recovered ({})", kind)))
            }
        }
    }

    /// Format a score, optionally with its per-signal breakdown.
    pub fn format_score(&self, breakdown: &ScoreBreakdown, detailed: bool) -> Result<String> {
        match self.format {
            OutputFormat::Quiet => Ok(format!("{:.3}", breakdown.total)),
            OutputFormat::Json if detailed => Ok(serde_json::to_string_pretty(breakdown)?),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(
                &json!({"confidence": breakdown.total}),
            )?),
            OutputFormat::Table if detailed => Ok(self.breakdown_table(breakdown)),
            OutputFormat::Table => Ok(format!("Confidence: {:.3}", breakdown.total)),
        }
    }

    fn breakdown_table(&self, breakdown: &ScoreBreakdown) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Signal", "Points"]);
        builder.push_record(["Base fields".to_string(), format!("{:.3}", breakdown.base_fields)]);
        builder.push_record(["Identifier".to_string(), format!("{:.3}", breakdown.identifier)]);
        builder.push_record(["Class fields".to_string(), format!("{:.3}", breakdown.class_fields)]);
        builder.push_record(["Field types".to_string(), format!("{:.3}", breakdown.field_types)]);
        builder.push_record(["Penalty".to_string(), format!("-{:.3}", breakdown.penalty)]);
        builder.push_record(["Total".to_string(), format!("{:.3}", breakdown.total)]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut out = table.to_string();
        if let Some(label) = &breakdown.class_label {
            out.push('\n');
            out.push_str(&self.info(&format!("Class: {}", label)));
        }
        for issue in &breakdown.issues {
            out.push('\n');
            out.push_str(&self.warning(&issue.to_string()));
        }
        out
    }

    /// Format an assessment (extraction, score and routing).
    pub fn format_assessment(&self, assessment: &Assessment) -> Result<String> {
        match self.format {
            OutputFormat::Quiet => Ok(assessment.routing.to_string()),
            OutputFormat::Json => {
                let failure = assessment.outcome.failure_kind();
                let value = json!({
                    "routing": assessment.routing,
                    "confidence": assessment.confidence(),
                    "failure": failure,
                    "record": assessment.outcome.record(),
                    "breakdown": assessment.breakdown,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let extraction = match assessment.outcome.failure_kind() {
                    Some(kind) => format!("failed ({})", kind),
                    None => "ok".to_string(),
                };
                let class = assessment
                    .breakdown
                    .as_ref()
                    .and_then(|b| b.class_label.clone())
                    .unwrap_or_else(|| "-".to_string());

                let mut builder = Builder::default();
                builder.push_record(["Extraction", "Class", "Confidence", "Routing"]);
                builder.push_record([
                    extraction,
                    class,
                    format!("{:.3}", assessment.confidence()),
                    self.routing(assessment.routing),
                ]);

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format a schema reference summary, optionally listing every class.
    pub fn format_schema(&self, schema: &SchemaReference, list_classes: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&schema.to_definition())?),
            OutputFormat::Quiet => Ok(schema
                .classes()
                .map(|(uid, _)| uid.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let names = schema.field_names();
                let severities = schema
                    .severities()
                    .map(|(id, label)| format!("{}={}", id, label))
                    .collect::<Vec<_>>()
                    .join(", ");

                let mut builder = Builder::default();
                builder.push_record(["Property", "Value"]);
                builder.push_record(["Classes".to_string(), schema.class_count().to_string()]);
                builder.push_record([
                    "Base fields".to_string(),
                    schema.base_required_fields().join(", "),
                ]);
                builder.push_record([
                    "Composite".to_string(),
                    format!(
                        "{} = {} * {} + {}",
                        names.composite_id,
                        names.class_id,
                        schema.identifier_multiplier(),
                        names.activity_id
                    ),
                ]);
                builder.push_record([format!("Severities ({})", names.severity), severities]);

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                let mut out = table.to_string();

                if list_classes {
                    let mut builder = Builder::default();
                    builder.push_record(["UID", "Name", "Required fields"]);
                    for (uid, name) in schema.classes() {
                        let required = schema
                            .class_required_fields(uid)
                            .map(|fields| fields.join(", "))
                            .unwrap_or_default();
                        builder.push_record([uid.to_string(), name.to_string(), required]);
                    }
                    let mut classes = builder.build();
                    classes.with(Style::rounded());
                    out.push('\n');
                    out.push_str(&classes.to_string());
                }
                Ok(out)
            }
        }
    }

    /// Format a chat prompt.
    pub fn format_prompt(&self, messages: &[ChatMessage]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(messages)?),
            OutputFormat::Quiet => Ok(serde_json::to_string(messages)?),
            OutputFormat::Table => {
                let sections: Vec<String> = messages
                    .iter()
                    .map(|message| {
                        let role = match message.role {
                            ChatRole::System => "system",
                            ChatRole::User => "user",
                            ChatRole::Assistant => "assistant",
                        };
                        format!("{}\n{}", self.colorize(&format!("[{}]", role), "cyan"), message.content)
                    })
                    .collect();
                Ok(sections.join("\n\n"))
            }
        }
    }

    /// Format a routing decision.
    pub fn routing(&self, decision: RoutingDecision) -> String {
        match decision {
            RoutingDecision::Accept => self.colorize(decision.as_str(), "green"),
            RoutingDecision::ManualReview => self.colorize(decision.as_str(), "yellow"),
        }
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
