//! Test utilities for the readmap workspace
//!
//! This crate provides common test helpers, fixtures, and utilities for testing
//! across the readmap workspace.
//!
//! # Features
//!
//! - **Test Environment**: Isolated test environments with automatic cleanup
//! - **Fixtures**: Deterministic FASTA/FASTQ reads and references
//! - **Fake bwa**: A scripted stand-in for the `bwa` executable
//! - **Assertions**: Custom assertions for tool output files

pub mod assertions;
pub mod environment;
pub mod fixtures;
pub mod mock;

// Re-export commonly used items
pub use environment::TestEnvironment;
pub use fixtures::{
    fasta_text, fastq_text, generate_reads, reference_fasta, total_bases, write_fasta,
    write_fastq, write_gzipped, TestRead,
};
pub use mock::{index_failure, progress_line, usage_banner, FakeBwa, InstalledFakeBwa};

// Re-export test dependencies for convenience
pub use anyhow::{Context, Result};
pub use tempfile;

/// Initialize test logging (call once per test module)
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .try_init();
}

/// Run a test with a clean environment
///
/// # Example
/// ```rust
/// use readmap_test::with_test_env;
///
/// with_test_env(|env| {
///     let reads = env.write_file("reads.fastq", b"")?;
///     assert!(reads.exists());
///     Ok(())
/// })
/// .unwrap();
/// ```
pub fn with_test_env<F, R>(f: F) -> Result<R>
where
    F: FnOnce(&TestEnvironment) -> Result<R>,
{
    let env = TestEnvironment::new()?;
    // Cleanup happens automatically via Drop
    f(&env)
}
