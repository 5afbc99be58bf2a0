//! Read file formats
//!
//! Format is decided by content, never by extension. Gzip input is detected
//! from its magic bytes and decompressed transparently.

mod counter;
mod input;

pub use counter::count_records;
pub use input::{is_gzipped, open_reads};

use readmap_core::ReadmapResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::BufRead;
use std::path::Path;

/// Sequence file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceFormat {
    Fasta,
    Fastq,
}

impl SequenceFormat {
    /// Format implied by the first byte of a file
    pub fn from_leading_byte(byte: Option<u8>) -> Option<Self> {
        match byte {
            Some(b'>') => Some(SequenceFormat::Fasta),
            Some(b'@') => Some(SequenceFormat::Fastq),
            _ => None,
        }
    }

    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            SequenceFormat::Fasta => "fasta",
            SequenceFormat::Fastq => "fastq",
        }
    }
}

impl fmt::Display for SequenceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceFormat::Fasta => write!(f, "FASTA"),
            SequenceFormat::Fastq => write!(f, "FASTQ"),
        }
    }
}

/// Detect the format of a read file from its first line
///
/// Unrecognized content (including an empty file) falls back to FASTA.
pub fn detect_format<P: AsRef<Path>>(path: P) -> ReadmapResult<SequenceFormat> {
    let path = path.as_ref();
    let mut reader = open_reads(path)?;
    // Raw bytes: binary input must reach the parser, not fail UTF-8 decoding
    let mut first_line = Vec::new();
    reader.read_until(b'\n', &mut first_line)?;

    match SequenceFormat::from_leading_byte(first_line.first().copied()) {
        Some(format) => Ok(format),
        None => {
            tracing::debug!(
                "{} does not start with '>' or '@', assuming FASTA",
                path.display()
            );
            Ok(SequenceFormat::Fasta)
        }
    }
}
