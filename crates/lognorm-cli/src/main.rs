//! lognorm CLI - recover, score and route OCSF records from model output.

use clap::Parser;
use lognorm_cli::{commands, load_config, Cli, Command, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> lognorm_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), cli.threshold)?;

    // Initialize tracing (log to stderr); RUST_LOG wins over the config
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let formatter = Formatter::new(
        cli.format.map(Into::into).unwrap_or_default(),
        !cli.no_color,
    );

    let output = match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter)?,
        Command::Score(args) => commands::execute_score(args, &config, &formatter)?,
        Command::Route(args) => commands::execute_route(args, &config, &formatter)?,
        Command::Schema(args) => commands::execute_schema(args, &config, &formatter)?,
        Command::Prompt(args) => commands::execute_prompt(args, &config, &formatter)?,
    };

    println!("{}", output);
    Ok(())
}
