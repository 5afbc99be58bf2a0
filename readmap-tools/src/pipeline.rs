//! The full mapping run: normalize reads, index, align

use crate::operations::{index_exists, BwaIndex, BwaMem};
use crate::types::{InvocationResult, InvocationStatus};
use readmap_bio::{ConcatenatingNormalizer, NormalizedReads, ReadCorpusNormalizer};
use readmap_core::{Config, OptionSet, ReadmapError, ReadmapResult};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::Span;

/// Last stage a pipeline run reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    Index,
    Align,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Index => write!(f, "index"),
            PipelineStage::Align => write!(f, "align"),
        }
    }
}

/// What a pipeline run produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub stage: PipelineStage,
    pub result: InvocationResult,
    pub reads: NormalizedReads,
    pub mates: Option<NormalizedReads>,
    /// Alignment output; only written when the align stage ran
    pub output: PathBuf,
}

impl PipelineOutcome {
    pub fn status(&self) -> InvocationStatus {
        self.result.status
    }

    /// Records bwa should have aligned
    pub fn expected_reads(&self) -> u64 {
        self.reads.records + self.mates.as_ref().map_or(0, |m| m.records)
    }
}

/// Builder and runner for a reads-to-alignment run
#[derive(Debug)]
pub struct MappingPipeline<N: ReadCorpusNormalizer = ConcatenatingNormalizer> {
    bwa: PathBuf,
    reference: PathBuf,
    reads: PathBuf,
    mates: Option<PathBuf>,
    mem_options: OptionSet,
    index_options: OptionSet,
    output: PathBuf,
    work_dir: PathBuf,
    reads_name: String,
    mates_name: String,
    skip_index: bool,
    normalizer: N,
    span: Span,
}

impl MappingPipeline<ConcatenatingNormalizer> {
    pub fn new(bwa: impl Into<PathBuf>, reference: impl Into<PathBuf>, reads: impl Into<PathBuf>) -> Self {
        let defaults = Config::default();
        Self {
            bwa: bwa.into(),
            reference: reference.into(),
            reads: reads.into(),
            mates: None,
            mem_options: OptionSet::new(),
            index_options: OptionSet::new(),
            output: defaults.output.alignment,
            work_dir: readmap_core::readmap_work_dir(),
            reads_name: defaults.output.reads,
            mates_name: defaults.output.mates,
            skip_index: false,
            normalizer: ConcatenatingNormalizer::new(),
            span: tracing::info_span!("map"),
        }
    }
}

impl<N: ReadCorpusNormalizer> MappingPipeline<N> {
    /// Take option sets and file names from a loaded config
    pub fn with_config(mut self, config: &Config) -> Self {
        self.mem_options = config.mem.clone();
        self.index_options = config.index.clone();
        self.output = config.output.alignment.clone();
        self.reads_name = config.output.reads.clone();
        self.mates_name = config.output.mates.clone();
        self
    }

    pub fn mates(mut self, mates: Option<PathBuf>) -> Self {
        self.mates = mates;
        self
    }

    pub fn mem_options(mut self, options: OptionSet) -> Self {
        self.mem_options = options;
        self
    }

    pub fn index_options(mut self, options: OptionSet) -> Self {
        self.index_options = options;
        self
    }

    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Where concatenated read files are written
    pub fn work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    /// Reuse an existing index instead of running `bwa index`
    pub fn skip_index(mut self, skip: bool) -> Self {
        self.skip_index = skip;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn normalizer<M: ReadCorpusNormalizer>(self, normalizer: M) -> MappingPipeline<M> {
        MappingPipeline {
            bwa: self.bwa,
            reference: self.reference,
            reads: self.reads,
            mates: self.mates,
            mem_options: self.mem_options,
            index_options: self.index_options,
            output: self.output,
            work_dir: self.work_dir,
            reads_name: self.reads_name,
            mates_name: self.mates_name,
            skip_index: self.skip_index,
            normalizer,
            span: self.span,
        }
    }

    /// Run every stage, stopping at the first unsuccessful one
    pub fn run(&self) -> ReadmapResult<PipelineOutcome> {
        let _guard = self.span.enter();

        std::fs::create_dir_all(&self.work_dir)?;
        let reads = self
            .normalizer
            .normalize(&self.reads, &self.work_dir.join(&self.reads_name))?;
        let mates = match &self.mates {
            Some(mates) => Some(
                self.normalizer
                    .normalize(mates, &self.work_dir.join(&self.mates_name))?,
            ),
            None => None,
        };
        tracing::info!(
            "Reads ready: {} records in {}{}",
            reads.records,
            reads.path.display(),
            mates
                .as_ref()
                .map(|m| format!(", {} mates in {}", m.records, m.path.display()))
                .unwrap_or_default()
        );

        if self.skip_index {
            if !index_exists(&self.reference) {
                return Err(ReadmapError::Validation(format!(
                    "{} does not have an index",
                    self.reference.display()
                )));
            }
            tracing::info!("Reusing existing index for {}", self.reference.display());
        } else if let Some(result) = self.index()? {
            return Ok(PipelineOutcome {
                stage: PipelineStage::Index,
                result,
                reads,
                mates,
                output: self.output.clone(),
            });
        }

        ensure_parent(&self.output)?;
        let mem = BwaMem::mem(
            &self.bwa,
            &self.reference,
            &reads.path,
            mates.as_ref().map(|m| m.path.as_path()),
            &self.mem_options,
        )?
        .with_span(self.span.clone());
        let result = mem.run(&self.output)?;

        Ok(PipelineOutcome {
            stage: PipelineStage::Align,
            result,
            reads,
            mates,
            output: self.output.clone(),
        })
    }

    /// Index the reference; returns the result only when it failed
    fn index(&self) -> ReadmapResult<Option<InvocationResult>> {
        let index = BwaIndex::index(&self.bwa, &self.reference, &self.index_options)?
            .with_span(self.span.clone());

        // bwa index writes nothing useful to stdout
        let placeholder = tempfile::NamedTempFile::new_in(&self.work_dir)?;
        let result = index.run(placeholder.path())?;
        placeholder.close()?;

        if result.status.is_success() {
            Ok(None)
        } else {
            tracing::error!("Indexing {} failed: {}", self.reference.display(), result.status);
            Ok(Some(result))
        }
    }
}

fn ensure_parent(path: &Path) -> ReadmapResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(std::fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}
