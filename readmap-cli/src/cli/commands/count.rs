use crate::cli::output::*;
use anyhow::Context;
use clap::{Args, ValueEnum};
use comfy_table::{Cell, CellAlignment};
use readmap_bio::{count_records, detect_format, SequenceFormat};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Args)]
pub struct CountArgs {
    /// FASTA or FASTQ files, optionally gzip-compressed
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct FileCount {
    path: PathBuf,
    format: SequenceFormat,
    records: u64,
}

pub fn run(args: CountArgs) -> anyhow::Result<i32> {
    let mut counts = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let format = detect_format(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        let records = count_records(path)?;
        counts.push(FileCount {
            path: path.clone(),
            format,
            records,
        });
    }

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&counts)?);
        }
        OutputFormat::Table => {
            section_header("Read Files");

            let mut table = create_standard_table();
            table.set_header(vec![
                header_cell("File"),
                header_cell("Format"),
                header_cell("Records"),
            ]);
            for count in &counts {
                table.add_row(vec![
                    Cell::new(count.path.display()),
                    Cell::new(count.format),
                    Cell::new(format_number(count.records)).set_alignment(CellAlignment::Right),
                ]);
            }
            println!("{}", table);

            let total: u64 = counts.iter().map(|c| c.records).sum();
            info(&format!("{} records in {} files", format_number(total), counts.len()));
        }
    }

    Ok(0)
}
