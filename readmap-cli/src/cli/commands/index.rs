use crate::cli::output::*;
use crate::cli::progress::create_spinner;
use anyhow::Context;
use clap::Args;
use readmap_core::Config;
use readmap_tools::{locate_bwa, BwaIndex};
use std::path::PathBuf;

#[derive(Args)]
pub struct IndexArgs {
    /// Reference FASTA to index
    pub reference: PathBuf,

    /// bwa executable (overrides config, READMAP_BWA and PATH)
    #[arg(long, value_name = "PATH")]
    pub bwa_path: Option<PathBuf>,

    /// BWT construction algorithm: is or bwtsw
    #[arg(short = 'a', value_name = "ALGO")]
    pub algorithm: Option<String>,
}

pub fn run(args: IndexArgs, config: &Config, quiet: bool) -> anyhow::Result<i32> {
    let bwa = locate_bwa(args.bwa_path.as_deref().or(config.bwa.path.as_deref()))?;

    let mut options = config.index.clone();
    if let Some(algorithm) = &args.algorithm {
        options.insert("a", algorithm.as_str());
    }

    let index = BwaIndex::index(&bwa, &args.reference, &options)
        .with_context(|| format!("Cannot index {}", args.reference.display()))?;

    // bwa index prints nothing useful on stdout
    let discard = tempfile::NamedTempFile::new()?;
    let spinner = create_spinner(&format!("Indexing {}...", args.reference.display()), quiet);
    let result = index.run(discard.path());
    spinner.finish_and_clear();
    let result = result?;

    if result.status.is_success() {
        if !quiet {
            success(&format!("Indexed {}", args.reference.display()));
        }
    } else {
        error(&format!(
            "bwa index failed on {} ({})",
            args.reference.display(),
            result.status
        ));
    }

    Ok(result.status.code())
}
