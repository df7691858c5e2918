//! Route command implementation.

use crate::cli::InputArgs;
use crate::error::Result;
use crate::input::read_input;
use crate::output::Formatter;
use lognorm_pipeline::{Assessor, NormalizerConfig};
use tracing::info;

/// Execute the route command.
pub fn execute_route(
    args: InputArgs,
    config: &NormalizerConfig,
    formatter: &Formatter,
) -> Result<String> {
    let raw = read_input(args.file.as_deref())?;

    let assessor = Assessor::from_config(config)?;
    let assessment = assessor.assess(&raw);
    info!(
        "confidence={:.3} threshold={:.2} routing={}",
        assessment.confidence(),
        assessor.threshold(),
        assessment.routing
    );

    formatter.format_assessment(&assessment)
}
