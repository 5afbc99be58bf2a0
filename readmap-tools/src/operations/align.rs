use super::{index_exists, require_input};
use crate::diagnostics;
use crate::invoker::ExternalTool;
use crate::traits::{classify_usage, ToolOperation};
use crate::types::{Classification, InvocationStatus, Operation};
use readmap_bio::count_records;
use readmap_core::{OptionSet, ReadmapError, ReadmapResult};
use std::path::{Path, PathBuf};

/// `bwa mem <reference> <reads> [mates]`
#[derive(Debug, Clone, Copy, Default)]
pub struct AlignOperation;

impl ToolOperation for AlignOperation {
    fn operation(&self) -> Operation {
        Operation::Align
    }

    fn validate_arguments(&self, arguments: &[PathBuf]) -> ReadmapResult<()> {
        if arguments.len() > 3 {
            return Err(ReadmapError::Validation(
                "Too many arguments supplied to bwa mem".to_string(),
            ));
        }
        if arguments.len() < 2 {
            return Err(ReadmapError::Validation(
                "Too few arguments supplied to bwa mem".to_string(),
            ));
        }

        let reference = &arguments[0];
        if !index_exists(reference) {
            return Err(ReadmapError::Validation(format!(
                "{} does not have an index",
                reference.display()
            )));
        }
        if !reference.exists() {
            return Err(ReadmapError::Validation(format!(
                "{} does not exist",
                reference.display()
            )));
        }

        for input in &arguments[1..] {
            require_input(input)?;
        }
        Ok(())
    }

    /// Cross-check the reported read count against the inputs
    fn classify(&self, arguments: &[PathBuf], stderr: &str) -> ReadmapResult<Classification> {
        let base = classify_usage(stderr);
        if base != InvocationStatus::Success {
            return Ok(Classification::new(base));
        }

        let counters = diagnostics::parse_progress(stderr)?;

        let mut expected = 0;
        for input in arguments.iter().skip(1) {
            expected += count_records(input)?;
        }

        let status = if expected == 0 {
            tracing::warn!("Input reads are empty, nothing was mapped");
            InvocationStatus::Failed
        } else if counters.sequences != expected {
            tracing::warn!(
                "bwa mem reported {} sequences but the input holds {}",
                counters.sequences,
                expected
            );
            InvocationStatus::Failed
        } else {
            InvocationStatus::Success
        };

        Ok(Classification::new(status).with_counters(counters))
    }
}

pub type BwaMem = ExternalTool<AlignOperation>;

impl ExternalTool<AlignOperation> {
    /// Map `reads` (and optional `mates`) against an indexed `reference`
    pub fn mem(
        bwa: &Path,
        reference: &Path,
        reads: &Path,
        mates: Option<&Path>,
        options: &OptionSet,
    ) -> ReadmapResult<Self> {
        let options = options.clone().with("bwa_path", bwa.to_string_lossy().into_owned());

        let mut arguments = vec![reference.to_path_buf(), reads.to_path_buf()];
        arguments.extend(mates.map(Path::to_path_buf));

        Self::new(AlignOperation, options, arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use readmap_test::{progress_line, usage_banner, write_fastq};
    use tempfile::TempDir;

    struct Inputs {
        _dir: TempDir,
        reference: PathBuf,
        reads: PathBuf,
        mates: PathBuf,
    }

    fn inputs(reads: usize, mates: usize) -> Inputs {
        let dir = TempDir::new().unwrap();
        let reference = dir.path().join("ref.fa");
        std::fs::write(&reference, ">chr1\nACGTACGT\n").unwrap();
        std::fs::write(dir.path().join("ref.fa.bwt"), b"").unwrap();
        let reads = write_fastq(dir.path(), "reads.fq", reads, 50).unwrap();
        let mates = write_fastq(dir.path(), "mates.fq", mates, 50).unwrap();
        Inputs {
            _dir: dir,
            reference,
            reads,
            mates,
        }
    }

    fn message(result: ReadmapResult<()>) -> String {
        match result {
            Err(ReadmapError::Validation(msg)) => msg,
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_argument_counts() {
        let i = inputs(1, 1);
        let op = AlignOperation;

        assert_eq!(
            message(op.validate_arguments(&[i.reference.clone()])),
            "Too few arguments supplied to bwa mem"
        );
        let four = vec![i.reference.clone(), i.reads.clone(), i.mates.clone(), i.mates.clone()];
        assert_eq!(
            message(op.validate_arguments(&four)),
            "Too many arguments supplied to bwa mem"
        );

        assert!(op.validate_arguments(&[i.reference.clone(), i.reads.clone()]).is_ok());
        assert!(op
            .validate_arguments(&[i.reference.clone(), i.reads.clone(), i.mates.clone()])
            .is_ok());
    }

    #[test]
    fn test_reference_must_be_indexed() {
        let i = inputs(1, 1);
        std::fs::remove_file(i.reference.with_extension("fa.bwt")).unwrap();

        let msg = message(AlignOperation.validate_arguments(&[i.reference.clone(), i.reads.clone()]));
        assert_eq!(msg, format!("{} does not have an index", i.reference.display()));
    }

    #[test]
    fn test_index_without_reference() {
        let i = inputs(1, 1);
        std::fs::remove_file(&i.reference).unwrap();

        let msg = message(AlignOperation.validate_arguments(&[i.reference.clone(), i.reads.clone()]));
        assert_eq!(msg, format!("{} does not exist", i.reference.display()));
    }

    #[test]
    fn test_missing_mates() {
        let i = inputs(1, 1);
        let missing = i.mates.with_file_name("nope.fq");

        let msg = message(AlignOperation.validate_arguments(&[
            i.reference.clone(),
            i.reads.clone(),
            missing.clone(),
        ]));
        assert_eq!(msg, format!("{} is not a valid input file", missing.display()));
    }

    #[test]
    fn test_counts_match() {
        let i = inputs(100, 0);
        let stderr = format!("{}{}", progress_line(50, 5000), progress_line(50, 5000));

        let classification = AlignOperation
            .classify(&[i.reference.clone(), i.reads.clone()], &stderr)
            .unwrap();
        assert_eq!(classification.status, InvocationStatus::Success);
        assert_eq!(classification.counters.sequences, 100);
        assert_eq!(classification.counters.base_pairs, 10000);
        assert_eq!(classification.counters.batches, 2);
    }

    #[test]
    fn test_counts_mismatch() {
        let i = inputs(90, 0);
        let stderr = format!("{}{}", progress_line(50, 5000), progress_line(50, 5000));

        let classification = AlignOperation
            .classify(&[i.reference.clone(), i.reads.clone()], &stderr)
            .unwrap();
        assert_eq!(classification.status, InvocationStatus::Failed);
    }

    #[test]
    fn test_mates_are_counted() {
        let i = inputs(40, 60);
        let stderr = progress_line(100, 10000);

        let classification = AlignOperation
            .classify(&[i.reference.clone(), i.reads.clone(), i.mates.clone()], &stderr)
            .unwrap();
        assert_eq!(classification.status, InvocationStatus::Success);
    }

    #[test]
    fn test_empty_reads_fail() {
        let i = inputs(0, 0);
        let classification = AlignOperation
            .classify(&[i.reference.clone(), i.reads.clone()], "")
            .unwrap();
        assert_eq!(classification.status, InvocationStatus::Failed);
    }

    #[test]
    fn test_usage_banner_wins_over_counters() {
        let i = inputs(100, 0);
        let stderr = format!("{}{}", progress_line(100, 10000), usage_banner("mem"));

        let classification = AlignOperation
            .classify(&[i.reference.clone(), i.reads.clone()], &stderr)
            .unwrap();
        assert_eq!(classification.status, InvocationStatus::UsageRejected);
    }
}
