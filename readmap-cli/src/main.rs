use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::{Cli, Commands};
use readmap_core::ReadmapError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(0) => {}
        Ok(status) => process::exit(status),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(exit_code(&e));
        }
    }
}

/// Exit code for an error that aborted a command
///
/// Codes 1 and 2 are also classified tool statuses, so setup problems get
/// their own code.
fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<ReadmapError>() {
        Some(ReadmapError::Configuration(_)) => 4,
        Some(ReadmapError::Io(_)) => 3,
        _ => 1,
    }
}

/// Logs go to stderr; READMAP_LOG overrides the verbosity flags
fn init_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::try_from_env("READMAP_LOG").unwrap_or_else(|_| EnvFilter::new(level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns the process exit status
fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = readmap_core::resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Map(args) => crate::cli::commands::map::run(args, &config, cli.quiet),
        Commands::Index(args) => crate::cli::commands::index::run(args, &config, cli.quiet),
        Commands::Count(args) => crate::cli::commands::count::run(args),
        Commands::Tool(args) => crate::cli::commands::tool::run(args, &config),
    }
}
