//! Common types for bwa invocations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// bwa subcommands readmap drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Index,
    Align,
}

impl Operation {
    /// The command word passed to bwa
    pub fn command(&self) -> &'static str {
        match self {
            Operation::Index => "index",
            Operation::Align => "mem",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bwa {}", self.command())
    }
}

/// Outcome of a tool run, derived from its diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvocationStatus {
    Success,
    Failed,
    UsageRejected,
}

impl InvocationStatus {
    /// Integer status, usable as a process exit code
    pub fn code(&self) -> i32 {
        match self {
            InvocationStatus::Success => 0,
            InvocationStatus::Failed => 1,
            InvocationStatus::UsageRejected => 2,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, InvocationStatus::Success)
    }
}

impl fmt::Display for InvocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationStatus::Success => write!(f, "success"),
            InvocationStatus::Failed => write!(f, "failed"),
            InvocationStatus::UsageRejected => write!(f, "usage rejected"),
        }
    }
}

/// Counters bwa reports while aligning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedCounters {
    pub sequences: u64,
    pub base_pairs: u64,
    /// Number of progress lines seen
    pub batches: u64,
}

/// Status and counters decided from a run's stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub status: InvocationStatus,
    pub counters: ReportedCounters,
}

impl Classification {
    pub fn new(status: InvocationStatus) -> Self {
        Self {
            status,
            counters: ReportedCounters::default(),
        }
    }

    pub fn with_counters(mut self, counters: ReportedCounters) -> Self {
        self.counters = counters;
        self
    }
}

/// A fully validated bwa command
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    pub executable: PathBuf,
    pub operation: Operation,
    /// Values of the required keys, in key order
    pub required_values: Vec<String>,
    pub option_arguments: Vec<String>,
    pub positional_arguments: Vec<PathBuf>,
}

impl ToolInvocation {
    /// Arguments after the executable
    pub fn arguments(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(1 + self.option_arguments.len() + self.positional_arguments.len());
        args.push(self.operation.command().to_string());
        args.extend(self.option_arguments.iter().cloned());
        args.extend(
            self.positional_arguments
                .iter()
                .map(|p| p.to_string_lossy().into_owned()),
        );
        args
    }

    /// Full argument vector, executable first
    pub fn argv(&self) -> Vec<String> {
        let mut argv = vec![self.executable.to_string_lossy().into_owned()];
        argv.extend(self.arguments());
        argv
    }

    /// Shell-like rendering for logs
    pub fn command_line(&self) -> String {
        self.argv()
            .iter()
            .map(|arg| {
                if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '\'' || c == '"') {
                    format!("'{}'", arg.replace('\'', "'\\''"))
                } else {
                    arg.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of running a tool invocation
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationResult {
    pub status: InvocationStatus,
    /// Raw process exit code; `None` when killed by a signal
    pub exit_code: Option<i32>,
    pub stderr: String,
    pub counters: ReportedCounters,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation() -> ToolInvocation {
        ToolInvocation {
            executable: PathBuf::from("/opt/bwa/bwa"),
            operation: Operation::Align,
            required_values: vec!["/opt/bwa/bwa".into(), "mem".into()],
            option_arguments: vec!["-t".into(), "4".into(), "-R".into(), "@RG\tID:x".into()],
            positional_arguments: vec![PathBuf::from("ref.fa"), PathBuf::from("my reads.fq")],
        }
    }

    #[test]
    fn test_argv_order() {
        assert_eq!(
            invocation().argv(),
            vec!["/opt/bwa/bwa", "mem", "-t", "4", "-R", "@RG\tID:x", "ref.fa", "my reads.fq"]
        );
    }

    #[test]
    fn test_command_line_quotes_whitespace() {
        assert_eq!(
            invocation().command_line(),
            "/opt/bwa/bwa mem -t 4 -R '@RG\tID:x' ref.fa 'my reads.fq'"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(InvocationStatus::Success.code(), 0);
        assert_eq!(InvocationStatus::Failed.code(), 1);
        assert_eq!(InvocationStatus::UsageRejected.code(), 2);
        assert!(!InvocationStatus::Failed.is_success());
    }

    #[test]
    fn test_operation_commands() {
        assert_eq!(Operation::Index.command(), "index");
        assert_eq!(Operation::Align.to_string(), "bwa mem");
    }
}
