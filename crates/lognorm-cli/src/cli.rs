//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// lognorm - Recover, score and route OCSF records from model output.
#[derive(Debug, Parser)]
#[command(name = "lognorm")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true, env = "LOGNORM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the acceptance threshold (clamped to 0.0-1.0)
    #[arg(short, long, global = true)]
    pub threshold: Option<f64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (bare values only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Recover a JSON object from raw model output
    Extract(ExtractArgs),

    /// Score a JSON record against the schema reference
    Score(ScoreArgs),

    /// Extract, score and route raw model output
    Route(InputArgs),

    /// Show the active schema reference
    Schema(SchemaArgs),

    /// Show the chat prompt that would be sent for a log
    Prompt(PromptArgs),
}

/// Input source shared by several commands.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Input file (reads stdin when omitted)
    pub file: Option<PathBuf>,
}

/// Arguments for the extract command.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Disable Python-literal repair
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the score command.
#[derive(Debug, Args)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Show per-signal contributions and issues
    #[arg(short, long)]
    pub breakdown: bool,
}

/// Arguments for the schema command.
#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// List every event class
    #[arg(long)]
    pub classes: bool,
}

/// Arguments for the prompt command.
#[derive(Debug, Args)]
pub struct PromptArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Product that produced the log (e.g. palo-alto)
    #[arg(short, long, default_value = "unknown")]
    pub source: String,

    /// Log format (json, cef, syslog, csv, leef, unknown)
    #[arg(long = "log-format", default_value = "unknown")]
    pub log_format: String,
}
