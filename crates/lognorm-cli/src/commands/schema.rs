//! Schema command implementation.

use crate::cli::SchemaArgs;
use crate::error::Result;
use crate::output::Formatter;
use lognorm_pipeline::NormalizerConfig;

/// Execute the schema command.
pub fn execute_schema(
    args: SchemaArgs,
    config: &NormalizerConfig,
    formatter: &Formatter,
) -> Result<String> {
    let schema = config.schema_reference()?;
    formatter.format_schema(&schema, args.classes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_schema_json_is_a_definition() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output =
            execute_schema(SchemaArgs { classes: false }, &NormalizerConfig::default(), &formatter)
                .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["identifier_multiplier"], 100);
        assert_eq!(value["classes"].as_array().unwrap().len(), 59);
    }
}
