//! Mock implementations for testing
//!
//! Provides a scripted stand-in for the `bwa` executable.

mod bwa;

pub use bwa::{index_failure, progress_line, usage_banner, FakeBwa, InstalledFakeBwa};
