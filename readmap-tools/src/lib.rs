//! Driving bwa from Rust
//!
//! This crate validates bwa invocations before they run, executes `bwa index`
//! and `bwa mem` as external processes, and decides whether a run succeeded
//! from the diagnostics bwa writes to stderr rather than from its exit code.

pub mod diagnostics;
pub mod invoker;
pub mod locator;
pub mod operations;
pub mod options;
pub mod pipeline;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use invoker::{ExternalTool, REQUIRED_OPTIONS};
pub use locator::{locate_bwa, tool_version};
pub use operations::{index_exists, AlignOperation, BwaIndex, BwaMem, IndexOperation};
pub use options::compile_options;
pub use pipeline::{MappingPipeline, PipelineOutcome, PipelineStage};
pub use traits::ToolOperation;
pub use types::{
    Classification, InvocationResult, InvocationStatus, Operation, ReportedCounters,
    ToolInvocation,
};
