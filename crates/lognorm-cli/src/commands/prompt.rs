//! Prompt command implementation.

use crate::cli::PromptArgs;
use crate::error::Result;
use crate::input::read_input;
use crate::output::Formatter;
use lognorm_pipeline::{LogFormat, NormalizeRequest, NormalizerConfig, PromptBuilder};

/// Execute the prompt command.
///
/// The log is validated exactly as the normalizer would validate it.
pub fn execute_prompt(
    args: PromptArgs,
    config: &NormalizerConfig,
    formatter: &Formatter,
) -> Result<String> {
    let raw_log = read_input(args.input.file.as_deref())?;
    let format: LogFormat = args.log_format.parse()?;

    let request = NormalizeRequest::new(raw_log, args.source)
        .with_format(format)
        .validated(config.max_raw_log_chars)?;

    let builder = PromptBuilder::new(&config.schema_reference()?)
        .with_examples(&config.examples, config.max_examples);

    formatter.format_prompt(&builder.build(&request))
}
