//! Score command implementation.

use crate::cli::ScoreArgs;
use crate::error::{CliError, Result};
use crate::input::read_input;
use crate::output::Formatter;
use lognorm_pipeline::NormalizerConfig;
use serde_json::Value;

/// Execute the score command.
///
/// The input must be a JSON object; use `route` for raw model output.
pub fn execute_score(
    args: ScoreArgs,
    config: &NormalizerConfig,
    formatter: &Formatter,
) -> Result<String> {
    let raw = read_input(args.input.file.as_deref())?;

    let record = match serde_json::from_str::<Value>(&raw)? {
        Value::Object(record) => record,
        other => {
            return Err(CliError::InvalidInput(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            )))
        }
    };

    let scorer = config.build_scorer()?;
    formatter.format_score(&scorer.breakdown(&record), args.breakdown)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
