//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::Result;
use crate::input::read_input;
use crate::output::Formatter;
use lognorm_pipeline::NormalizerConfig;
use tracing::debug;

/// Execute the extract command.
pub fn execute_extract(
    args: ExtractArgs,
    config: &NormalizerConfig,
    formatter: &Formatter,
) -> Result<String> {
    let raw = read_input(args.input.file.as_deref())?;

    let parser = config
        .build_parser()
        .with_lenient_quotes(config.lenient_quotes && !args.strict);
    debug!(
        "Extracting from {} chars (strategies: {:?}, lenient: {})",
        raw.len(),
        parser.strategy_names(),
        parser.is_lenient()
    );

    formatter.format_outcome(&parser.extract(&raw))
}
