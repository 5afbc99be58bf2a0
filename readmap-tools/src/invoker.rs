//! Running bwa as an external process
//!
//! An [`ExternalTool`] is fully validated when constructed: required keys are
//! present, the executable exists and the operation accepted its positional
//! arguments. Only then can it be run.

use crate::options::compile_options;
use crate::traits::ToolOperation;
use crate::types::{Classification, InvocationResult, ToolInvocation};
use readmap_core::{OptionSet, ReadmapError, ReadmapResult};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::Span;

/// Keys every invocation needs, in the order their values are recorded
pub const REQUIRED_OPTIONS: [&str; 2] = ["bwa_path", "command"];

/// A validated bwa invocation
#[derive(Debug)]
pub struct ExternalTool<O: ToolOperation> {
    operation: O,
    invocation: ToolInvocation,
    span: Span,
}

impl<O: ToolOperation> ExternalTool<O> {
    /// Validate and assemble an invocation
    ///
    /// `options` must carry `bwa_path`; `command` is filled in from the
    /// operation. Every other key is compiled into option arguments.
    pub fn new(operation: O, options: OptionSet, arguments: Vec<PathBuf>) -> ReadmapResult<Self> {
        let mut options = options;
        options.insert("command", operation.operation().command());

        let mut required_values = Vec::with_capacity(REQUIRED_OPTIONS.len());
        for key in REQUIRED_OPTIONS {
            let value = options.remove(key).ok_or_else(|| {
                ReadmapError::Configuration(format!("{} is a required parameter", key))
            })?;
            required_values.push(value.to_string());
        }

        let executable = PathBuf::from(&required_values[0]);
        if !executable.exists() {
            return Err(ReadmapError::Configuration(format!(
                "{} is not a valid bwa path",
                executable.display()
            )));
        }

        let option_arguments = compile_options(&options);
        operation.validate_arguments(&arguments)?;

        let invocation = ToolInvocation {
            executable,
            operation: operation.operation(),
            required_values,
            option_arguments,
            positional_arguments: arguments,
        };

        Ok(Self {
            operation,
            invocation,
            span: Span::current(),
        })
    }

    /// Emit this invocation's events inside `span`
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn invocation(&self) -> &ToolInvocation {
        &self.invocation
    }

    /// Run bwa, writing its stdout to `output`, and classify the outcome
    ///
    /// Blocks until the process exits. The exit code is recorded but does not
    /// decide the status.
    pub fn run(&self, output: &Path) -> ReadmapResult<InvocationResult> {
        let _guard = self.span.enter();
        let command_line = self.invocation.command_line();
        tracing::info!("Running {}", command_line);

        let stdout = File::create(output).map_err(|e| {
            ReadmapError::Tool(format!("Cannot create output file {}: {}", output.display(), e))
        })?;

        let process = Command::new(&self.invocation.executable)
            .args(self.invocation.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| ReadmapError::Tool(format!("Failed to run {}: {}", command_line, e)))?;

        let stderr = String::from_utf8_lossy(&process.stderr).into_owned();
        tracing::debug!("{} stderr:\n{}", self.invocation.operation, stderr);

        let exit_code = process.status.code();
        if exit_code != Some(0) {
            tracing::debug!(
                "{} exited with {:?}; status is taken from its diagnostics",
                self.invocation.operation,
                exit_code
            );
        }

        let Classification { status, counters } = self.classify_inner(&stderr)?;
        tracing::info!("{} finished: {}", self.invocation.operation, status);

        Ok(InvocationResult {
            status,
            exit_code,
            stderr,
            counters,
        })
    }

    /// Classify captured stderr for this invocation
    pub fn classify(&self, stderr: &str) -> ReadmapResult<Classification> {
        let _guard = self.span.enter();
        self.classify_inner(stderr)
    }

    fn classify_inner(&self, stderr: &str) -> ReadmapResult<Classification> {
        self.operation
            .classify(&self.invocation.positional_arguments, stderr)
    }
}
