use crate::cli::output::*;
use clap::Args;
use readmap_core::Config;
use readmap_tools::{locate_bwa, tool_version};
use std::path::PathBuf;

#[derive(Args)]
pub struct ToolArgs {
    /// bwa executable (overrides config, READMAP_BWA and PATH)
    #[arg(long, value_name = "PATH")]
    pub bwa_path: Option<PathBuf>,
}

pub fn run(args: ToolArgs, config: &Config) -> anyhow::Result<i32> {
    let bwa = locate_bwa(args.bwa_path.as_deref().or(config.bwa.path.as_deref()))?;
    let version = tool_version(&bwa)?;

    section_header("bwa");
    tree_item(false, "Path", Some(&bwa.display().to_string()));
    match &version {
        Some(version) => tree_item(true, "Version", Some(version)),
        None => {
            tree_item(true, "Version", Some("unknown"));
            warning("bwa did not report a version");
        }
    }

    section_header("Paths");
    println!("{}", readmap_core::system::describe_paths());

    Ok(0)
}
