pub mod commands;
pub mod output;
pub mod progress;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "readmap",
    version,
    about = "Map short reads with bwa and verify the run",
    long_about = "readmap prepares reads (a file or a directory of FASTA/FASTQ files), indexes the \
                  reference and runs bwa mem, then checks bwa's own diagnostics to decide whether \
                  the run actually succeeded."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to $READMAP_HOME/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbosity level (can be repeated)
    #[arg(long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Index the reference and map reads against it
    Map(commands::map::MapArgs),

    /// Build a bwa index for a reference
    Index(commands::index::IndexArgs),

    /// Show the detected format and record count of read files
    Count(commands::count::CountArgs),

    /// Show which bwa would be used
    Tool(commands::tool::ToolArgs),
}
