use crate::cli::output::*;
use crate::cli::progress::create_spinner;
use anyhow::Context;
use clap::Args;
use readmap_core::{Config, OptionSet, OptionValue};
use readmap_tools::{locate_bwa, InvocationStatus, MappingPipeline, PipelineStage};
use std::path::PathBuf;

#[derive(Args)]
pub struct MapArgs {
    /// Indexed (or to-be-indexed) reference FASTA
    pub reference: PathBuf,

    /// Reads file, or a directory of FASTA/FASTQ files to concatenate
    pub reads: PathBuf,

    /// Mates file or directory for paired-end reads
    pub mates: Option<PathBuf>,

    /// Alignment output file [default: output.alignment from config, else bwa.sai]
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// bwa executable (overrides config, READMAP_BWA and PATH)
    #[arg(long, value_name = "PATH")]
    pub bwa_path: Option<PathBuf>,

    /// Reuse an existing index instead of running bwa index
    #[arg(long)]
    pub skip_index: bool,

    /// Directory for concatenated reads [default: READMAP_WORK_DIR or .]
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Number of threads
    #[arg(short = 't', value_name = "INT")]
    pub threads: Option<u32>,

    /// Minimum seed length
    #[arg(short = 'k', value_name = "INT")]
    pub min_seed_length: Option<u32>,

    /// Band width for banded alignment
    #[arg(short = 'w', value_name = "INT")]
    pub band_width: Option<u32>,

    /// Off-diagonal X-dropoff
    #[arg(short = 'd', value_name = "INT")]
    pub x_dropoff: Option<u32>,

    /// Look for internal seeds inside a seed longer than {-k} * FLOAT
    #[arg(short = 'r', value_name = "FLOAT")]
    pub reseed_ratio: Option<f64>,

    /// Skip seeds with more than INT occurrences
    #[arg(short = 'c', value_name = "INT")]
    pub max_occurrences: Option<u32>,

    /// Skip mate rescue
    #[arg(short = 'S')]
    pub skip_mate_rescue: bool,

    /// Skip pairing; mate rescue is still performed unless -S is also given
    #[arg(short = 'P')]
    pub skip_pairing: bool,

    /// Score for a sequence match
    #[arg(short = 'A', value_name = "INT")]
    pub match_score: Option<u32>,

    /// Penalty for a mismatch
    #[arg(short = 'B', value_name = "INT")]
    pub mismatch_penalty: Option<u32>,

    /// Gap open penalty
    #[arg(short = 'O', value_name = "INT[,INT]")]
    pub gap_open: Option<String>,

    /// Gap extension penalty; a gap of size k costs {-O} + {-E}*k
    #[arg(short = 'E', value_name = "INT[,INT]")]
    pub gap_extension: Option<String>,

    /// Penalty for clipping
    #[arg(short = 'L', value_name = "INT[,INT]")]
    pub clipping_penalty: Option<String>,

    /// Penalty for an unpaired read pair
    #[arg(short = 'U', value_name = "INT")]
    pub unpaired_penalty: Option<u32>,

    /// First query file consists of interleaved paired-end sequences
    #[arg(short = 'p')]
    pub interleaved: bool,

    /// Read group header line such as '@RG\tID:foo\tSM:bar'
    #[arg(short = 'R', value_name = "STR")]
    pub read_group: Option<String>,

    /// bwa verbosity: 1=error, 2=warning, 3=message, 4+=debugging
    #[arg(short = 'v', value_name = "INT")]
    pub verbosity: Option<u32>,

    /// Minimum score to output
    #[arg(short = 'T', value_name = "INT")]
    pub min_score: Option<u32>,

    /// Output all alignments for single-end or unpaired paired-end reads
    #[arg(short = 'a')]
    pub all_alignments: bool,

    /// Append FASTA/FASTQ comment to SAM output
    #[arg(short = 'C')]
    pub append_comment: bool,

    /// Hard clipping
    #[arg(short = 'H')]
    pub hard_clipping: bool,

    /// Mark shorter split hits as secondary
    #[arg(short = 'M')]
    pub mark_secondary: bool,
}

impl MapArgs {
    /// bwa mem options: config defaults overridden by anything given here
    pub fn mem_options(&self, defaults: &OptionSet) -> OptionSet {
        let text = |value: &Option<String>| value.clone().map(OptionValue::from);

        let given = [
            ("t", self.threads.map(OptionValue::from)),
            ("k", self.min_seed_length.map(OptionValue::from)),
            ("w", self.band_width.map(OptionValue::from)),
            ("d", self.x_dropoff.map(OptionValue::from)),
            ("r", self.reseed_ratio.map(OptionValue::from)),
            ("c", self.max_occurrences.map(OptionValue::from)),
            ("S", flag(self.skip_mate_rescue)),
            ("P", flag(self.skip_pairing)),
            ("A", self.match_score.map(OptionValue::from)),
            ("B", self.mismatch_penalty.map(OptionValue::from)),
            ("O", text(&self.gap_open)),
            ("E", text(&self.gap_extension)),
            ("L", text(&self.clipping_penalty)),
            ("U", self.unpaired_penalty.map(OptionValue::from)),
            ("p", flag(self.interleaved)),
            ("R", text(&self.read_group)),
            ("v", self.verbosity.map(OptionValue::from)),
            ("T", self.min_score.map(OptionValue::from)),
            ("a", flag(self.all_alignments)),
            ("C", flag(self.append_comment)),
            ("H", flag(self.hard_clipping)),
            ("M", flag(self.mark_secondary)),
        ];

        let mut options = defaults.clone();
        for (key, value) in given {
            if let Some(value) = value {
                options.insert(key, value);
            }
        }
        options
    }
}

/// Switches are only passed to bwa when set
fn flag(set: bool) -> Option<OptionValue> {
    set.then_some(OptionValue::Flag(true))
}

pub fn run(args: MapArgs, config: &Config, quiet: bool) -> anyhow::Result<i32> {
    let bwa = locate_bwa(args.bwa_path.as_deref().or(config.bwa.path.as_deref()))?;

    let mut pipeline = MappingPipeline::new(&bwa, &args.reference, &args.reads)
        .with_config(config)
        .mates(args.mates.clone())
        .mem_options(args.mem_options(&config.mem))
        .skip_index(args.skip_index);
    if let Some(output) = &args.output {
        pipeline = pipeline.output(output);
    }
    if let Some(work_dir) = &args.work_dir {
        pipeline = pipeline.work_dir(work_dir);
    }

    let spinner = create_spinner("Running bwa...", quiet);
    let outcome = pipeline.run();
    spinner.finish_and_clear();
    let outcome = outcome.with_context(|| format!("Failed to map {}", args.reads.display()))?;

    let status = outcome.status();
    match (outcome.stage, status) {
        (PipelineStage::Align, InvocationStatus::Success) => {
            if !quiet {
                success(&format!(
                    "Mapped {} reads ({} bp) to {}",
                    format_number(outcome.result.counters.sequences),
                    format_number(outcome.result.counters.base_pairs),
                    args.reference.display()
                ));
                info(&format!("Alignments written to {}", outcome.output.display()));
            }
        }
        (PipelineStage::Index, _) => {
            error(&format!(
                "bwa index failed on {} ({})",
                args.reference.display(),
                status
            ));
        }
        (PipelineStage::Align, InvocationStatus::UsageRejected) => {
            error("bwa mem rejected its arguments and printed its usage text");
        }
        (PipelineStage::Align, InvocationStatus::Failed) => {
            error(&format!(
                "bwa mem reported {} reads but {} were supplied",
                format_number(outcome.result.counters.sequences),
                format_number(outcome.expected_reads())
            ));
            if outcome.result.exit_code != Some(0) && !quiet {
                warning(&format!("bwa exited with {:?}", outcome.result.exit_code));
            }
        }
    }

    Ok(status.code())
}
