//! lognorm CLI library.
//!
//! Command-line access to the recovery parser, the conformance scorer and
//! the routing decision, over files or stdin.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use cli::{Cli, Command};
pub use config::{load_config, OutputFormat};
pub use error::{CliError, Result};
pub use output::Formatter;
