//! Parsing of bwa's standard-error diagnostics
//!
//! bwa's exit code is not a reliable success signal, so run outcomes are read
//! from the text it writes to stderr.

use crate::types::ReportedCounters;
use once_cell::sync::Lazy;
use readmap_core::{ReadmapError, ReadmapResult};
use regex::Regex;

static USAGE_BANNER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Usage:\s*bwa").expect("usage banner regex is valid"));

static PROGRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[M::main_mem\] read (\d+) sequences \((\d+) bp\)")
        .expect("progress regex is valid")
});

static VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(?:^|\[main\] )Version:\s*(\S+)").expect("version regex is valid")
});

const INDEX_FAILURE: &str = "[bwa_index] fail to open file";

/// Whether bwa printed its usage text instead of running
pub fn has_usage_banner(stderr: &str) -> bool {
    USAGE_BANNER.is_match(stderr)
}

/// Whether `bwa index` could not open its input
pub fn has_index_failure(stderr: &str) -> bool {
    stderr.contains(INDEX_FAILURE)
}

/// Sum every alignment progress line
pub fn parse_progress(stderr: &str) -> ReadmapResult<ReportedCounters> {
    let mut counters = ReportedCounters::default();

    for captures in PROGRESS.captures_iter(stderr) {
        counters.sequences += parse_counter(&captures[1], "sequence")?;
        counters.base_pairs += parse_counter(&captures[2], "base pair")?;
        counters.batches += 1;
    }

    Ok(counters)
}

fn parse_counter(text: &str, what: &str) -> ReadmapResult<u64> {
    text.parse().map_err(|e| {
        ReadmapError::Format(format!("bwa reported an unreadable {} count '{}': {}", what, text, e))
    })
}

/// Version reported by bwa, if any
pub fn parse_version(stderr: &str) -> Option<String> {
    VERSION
        .captures(stderr)
        .map(|captures| captures[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use readmap_test::{index_failure, progress_line, usage_banner};

    #[test]
    fn test_usage_banner() {
        assert!(has_usage_banner(&usage_banner("mem")));
        assert!(has_usage_banner("Usage:bwa index"));
        assert!(!has_usage_banner("[M::main_mem] read 10 sequences (1000 bp)..."));
    }

    #[test]
    fn test_index_failure() {
        assert!(has_index_failure(&index_failure("ref.fa")));
        assert!(!has_index_failure("[bwa_index] Pack FASTA... 0.01 sec"));
    }

    #[test]
    fn test_progress_is_summed() {
        let stderr = format!(
            "[M::bwa_idx_load_from_disk] read 0 ALT contigs\n{}{}[main] Real time: 0.1 sec\n",
            progress_line(50, 5000),
            progress_line(50, 6350)
        );

        let counters = parse_progress(&stderr).unwrap();
        assert_eq!(
            counters,
            ReportedCounters {
                sequences: 100,
                base_pairs: 11350,
                batches: 2
            }
        );
    }

    #[test]
    fn test_no_progress() {
        assert_eq!(parse_progress("").unwrap(), ReportedCounters::default());
    }

    #[test]
    fn test_overflowing_counter() {
        let stderr = "[M::main_mem] read 99999999999999999999999 sequences (1 bp)...";
        assert!(matches!(parse_progress(stderr), Err(ReadmapError::Format(_))));
    }

    #[test]
    fn test_version() {
        assert_eq!(
            parse_version("[main] Version: 0.7.17-r1188\n[main] CMD: bwa mem"),
            Some("0.7.17-r1188".to_string())
        );
        assert_eq!(
            parse_version("\nProgram: bwa\nVersion: 0.7.18-r1243-dirty\n"),
            Some("0.7.18-r1243-dirty".to_string())
        );
        assert_eq!(parse_version("no version here"), None);
    }
}
