/// Integration tests for normalizing read corpora
use readmap_bio::{count_records, ConcatenatingNormalizer, ReadCorpusNormalizer, SequenceFormat};
use readmap_core::ReadmapError;
use readmap_test::{fastq_text, generate_reads, write_fastq, write_gzipped};
use std::path::PathBuf;
use tempfile::TempDir;

fn reads_dir(root: &TempDir) -> PathBuf {
    let dir = root.path().join("reads");
    std::fs::create_dir(&dir).unwrap();
    dir
}

#[test]
fn test_concatenated_count_is_sum_of_parts() {
    let root = TempDir::new().unwrap();
    let input = reads_dir(&root);
    let a = write_fastq(&input, "a.fastq", 30, 50).unwrap();
    let b = write_fastq(&input, "b.fq", 45, 80).unwrap();
    let destination = root.path().join("work/reads.fastq");

    let normalized = ConcatenatingNormalizer::new()
        .normalize(&input, &destination)
        .unwrap();

    let expected = count_records(&a).unwrap() + count_records(&b).unwrap();
    assert_eq!(normalized.records, expected);
    assert_eq!(count_records(&destination).unwrap(), expected);
    assert_eq!(normalized.path, destination);
    assert_eq!(normalized.format, SequenceFormat::Fastq);
    assert_eq!(normalized.sources, vec![a, b]);
}

#[test]
fn test_sources_are_sorted_and_gz_is_decompressed() {
    let root = TempDir::new().unwrap();
    let input = reads_dir(&root);
    let reads = generate_reads(10, 30);
    write_gzipped(&input.join("b.fastq.gz"), &fastq_text(&reads[5..])).unwrap();
    std::fs::write(input.join("a.fastq"), fastq_text(&reads[..5])).unwrap();
    std::fs::write(input.join("c.sff"), b".sff").unwrap();
    let destination = root.path().join("reads.fastq");

    let normalized = ConcatenatingNormalizer::new()
        .normalize(&input, &destination)
        .unwrap();

    assert_eq!(normalized.records, 10);
    assert_eq!(normalized.sources.len(), 2);
    assert_eq!(std::fs::read_to_string(&destination).unwrap(), fastq_text(&reads));
}

#[test]
fn test_unparseable_member_fails_with_format_error() {
    let root = TempDir::new().unwrap();
    let input = reads_dir(&root);
    write_fastq(&input, "a.fastq", 3, 20).unwrap();
    std::fs::write(input.join("b.fastq"), "@broken\nACGT\n").unwrap();

    let result = ConcatenatingNormalizer::new().normalize(&input, &root.path().join("out.fastq"));
    match result {
        Err(ReadmapError::Format(msg)) => assert!(msg.contains("b.fastq")),
        other => panic!("Expected Format error, got {:?}", other),
    }
}
