//! Sequence file utilities for readmap

pub mod corpus;
pub mod formats;

// Re-export commonly used types
pub use corpus::{ConcatenatingNormalizer, NormalizedReads, ReadCorpusNormalizer};
pub use formats::{count_records, detect_format, open_reads, SequenceFormat};
