//! The operation hook trait for bwa invocations

use crate::diagnostics;
use crate::types::{Classification, InvocationStatus, Operation};
use readmap_core::ReadmapResult;
use std::fmt;
use std::path::PathBuf;

mod sealed {
    pub trait Sealed {}

    impl Sealed for crate::operations::IndexOperation {}
    impl Sealed for crate::operations::AlignOperation {}
}

/// Per-subcommand behavior plugged into [`crate::ExternalTool`]
///
/// Sealed: readmap supports exactly `bwa index` and `bwa mem`.
pub trait ToolOperation: sealed::Sealed + fmt::Debug {
    /// Which subcommand this is
    fn operation(&self) -> Operation;

    /// Check positional arguments before anything is spawned
    fn validate_arguments(&self, arguments: &[PathBuf]) -> ReadmapResult<()>;

    /// Decide the run status from captured stderr
    fn classify(&self, arguments: &[PathBuf], stderr: &str) -> ReadmapResult<Classification> {
        let _ = arguments;
        Ok(Classification::new(classify_usage(stderr)))
    }
}

/// Base classification shared by every operation
pub fn classify_usage(stderr: &str) -> InvocationStatus {
    if diagnostics::has_usage_banner(stderr) {
        tracing::warn!("bwa printed its usage text instead of running, check the supplied options");
        InvocationStatus::UsageRejected
    } else {
        InvocationStatus::Success
    }
}
