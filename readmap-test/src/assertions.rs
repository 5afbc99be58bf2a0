//! Custom assertions for testing
//!
//! Provides specialized assertions for tool output files and command lines.

use std::path::Path;

/// Assert that a file exists and has content
pub fn assert_non_empty_file(path: &Path) {
    let metadata = std::fs::metadata(path)
        .unwrap_or_else(|e| panic!("{} should exist: {}", path.display(), e));
    assert!(metadata.len() > 0, "{} should not be empty", path.display());
}

/// Assert that FASTQ content holds exactly `expected` records
pub fn assert_fastq_record_count(content: &str, expected: usize) {
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len() % 4, 0, "FASTQ content is not a multiple of four lines");

    for record in lines.chunks(4) {
        assert!(record[0].starts_with('@'), "Invalid FASTQ header: {}", record[0]);
        assert!(record[2].starts_with('+'), "Invalid FASTQ separator: {}", record[2]);
        assert_eq!(
            record[1].len(),
            record[3].len(),
            "Sequence and quality lengths differ for {}",
            record[0]
        );
    }

    assert_eq!(lines.len() / 4, expected, "Unexpected FASTQ record count");
}

/// Assert that `needle` appears in `args` as a contiguous run
pub fn assert_args_contain(args: &[String], needle: &[&str]) {
    let found = args
        .windows(needle.len().max(1))
        .any(|window| window.iter().map(String::as_str).eq(needle.iter().copied()));
    assert!(found, "Expected {:?} in arguments {:?}", needle, args);
}
