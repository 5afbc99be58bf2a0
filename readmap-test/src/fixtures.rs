//! Test fixtures and data generators
//!
//! Deterministic reads and references for use across the readmap workspace.

use anyhow::Result;
use flate2::write::GzEncoder;
use flate2::Compression;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::path::{Path, PathBuf};

const BASES: [char; 4] = ['A', 'C', 'G', 'T'];

/// Test read with a sequence and Phred+33 qualities
#[derive(Debug, Clone)]
pub struct TestRead {
    pub id: String,
    pub sequence: String,
    pub quality: String,
}

impl TestRead {
    /// Create a read with uniform high qualities
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        let sequence = sequence.into();
        let quality = "I".repeat(sequence.len());
        Self {
            id: id.into(),
            sequence,
            quality,
        }
    }

    /// Convert to FASTQ format
    pub fn to_fastq(&self) -> String {
        format!("@{}\n{}\n+\n{}\n", self.id, self.sequence, self.quality)
    }

    /// Convert to FASTA format
    pub fn to_fasta(&self) -> String {
        format!(">{}\n{}\n", self.id, self.sequence)
    }
}

/// Generate random DNA reads
pub fn generate_reads(count: usize, length: usize) -> Vec<TestRead> {
    let mut rng = StdRng::seed_from_u64(42); // Deterministic for tests

    (0..count)
        .map(|i| {
            let sequence: String = (0..length).map(|_| BASES[rng.gen_range(0..4)]).collect();
            TestRead::new(format!("read_{}", i), sequence)
        })
        .collect()
}

/// Total number of bases across reads
pub fn total_bases(reads: &[TestRead]) -> usize {
    reads.iter().map(|r| r.sequence.len()).sum()
}

/// FASTQ file content for reads
pub fn fastq_text(reads: &[TestRead]) -> String {
    reads.iter().map(TestRead::to_fastq).collect()
}

/// FASTA file content for reads
pub fn fasta_text(reads: &[TestRead]) -> String {
    reads.iter().map(TestRead::to_fasta).collect()
}

/// Reference FASTA with `contigs` records of `length` bases, wrapped at 60 columns
pub fn reference_fasta(contigs: usize, length: usize) -> String {
    let mut rng = StdRng::seed_from_u64(7);
    let mut content = String::new();

    for i in 0..contigs {
        content.push_str(&format!(">chr{} test contig\n", i + 1));
        let sequence: Vec<char> = (0..length).map(|_| BASES[rng.gen_range(0..4)]).collect();
        for line in sequence.chunks(60) {
            content.extend(line.iter());
            content.push('\n');
        }
    }
    content
}

/// Write `count` generated reads as FASTQ into `dir/name`
pub fn write_fastq(dir: &Path, name: &str, count: usize, length: usize) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, fastq_text(&generate_reads(count, length)))?;
    Ok(path)
}

/// Write `count` generated reads as FASTA into `dir/name`
pub fn write_fasta(dir: &Path, name: &str, count: usize, length: usize) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, fasta_text(&generate_reads(count, length)))?;
    Ok(path)
}

/// Write gzip-compressed content to `path`
pub fn write_gzipped(path: &Path, content: &str) -> Result<PathBuf> {
    let file = std::fs::File::create(path)?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(content.as_bytes())?;
    encoder.finish()?;
    Ok(path.to_path_buf())
}
