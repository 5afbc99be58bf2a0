//! Fake bwa executable for testing
//!
//! Writes a POSIX shell script that answers `bwa index` and `bwa mem` with
//! scripted stdout/stderr text. Every invocation appends its argv to a
//! `<script>.calls` file so tests can check the exact command line.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Companion files `bwa index` writes next to the reference
const INDEX_EXTENSIONS: &[&str] = &["amb", "ann", "bwt", "pac", "sa"];

/// A `bwa mem` progress line as bwa prints it
pub fn progress_line(sequences: u64, base_pairs: u64) -> String {
    format!("[M::main_mem] read {} sequences ({} bp)...\n", sequences, base_pairs)
}

/// The usage banner bwa prints when it rejects its arguments
pub fn usage_banner(command: &str) -> String {
    format!("\nUsage: bwa {} [options] <idxbase> <in1.fq> [in2.fq]\n\nAlgorithm options:\n", command)
}

/// The diagnostic bwa index prints when its input cannot be opened
pub fn index_failure(name: &str) -> String {
    format!("[bwa_index] fail to open file '{}'. Abort!\n", name)
}

/// Builder for a fake bwa script
#[derive(Debug, Clone)]
pub struct FakeBwa {
    index_stderr: String,
    create_index_files: bool,
    mem_stdout: String,
    mem_stderr: String,
    default_stderr: String,
    exit_code: i32,
}

impl Default for FakeBwa {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeBwa {
    /// A fake that indexes successfully and maps without reporting progress
    pub fn new() -> Self {
        Self {
            index_stderr: "[bwa_index] Pack FASTA... 0.00 sec\n\
                           [bwa_index] Construct BWT for the packed sequence...\n\
                           [main] Version: 0.7.17-r1188\n"
                .to_string(),
            create_index_files: true,
            mem_stdout: "@SQ\tSN:chr1\tLN:1000\n@PG\tID:bwa\tPN:bwa\tVN:0.7.17-r1188\n".to_string(),
            mem_stderr: "[main] Version: 0.7.17-r1188\n".to_string(),
            default_stderr: "\nProgram: bwa (alignment via Burrows-Wheeler transformation)\n\
                             Version: 0.7.17-r1188\n\
                             Contact: Heng Li <hengli@broadinstitute.org>\n\n\
                             Usage:   bwa <command> [options]\n"
                .to_string(),
            exit_code: 0,
        }
    }

    /// Text written to stderr by `bwa index`
    pub fn index_stderr(mut self, text: impl Into<String>) -> Self {
        self.index_stderr = text.into();
        self
    }

    /// Do not create the `.bwt` and other companion files on index
    pub fn without_index_files(mut self) -> Self {
        self.create_index_files = false;
        self
    }

    /// Text written to stdout by `bwa mem`
    pub fn mem_stdout(mut self, text: impl Into<String>) -> Self {
        self.mem_stdout = text.into();
        self
    }

    /// Text written to stderr by `bwa mem`
    pub fn mem_stderr(mut self, text: impl Into<String>) -> Self {
        self.mem_stderr = text.into();
        self
    }

    /// Exit code for every command
    pub fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    fn script(&self, calls: &Path) -> String {
        let create = if self.create_index_files {
            let extensions = INDEX_EXTENSIONS.join(" ");
            format!(
                "  if [ \"$#\" -ge 2 ]; then\n    for ext in {}; do : > \"$last.$ext\"; done\n  fi\n",
                extensions
            )
        } else {
            String::new()
        };

        format!(
            "#!/bin/sh\n\
             printf '%s\\t' \"$@\" >> {calls}\n\
             printf '\\n' >> {calls}\n\
             last=\n\
             for last; do :; done\n\
             case \"$1\" in\n\
             index)\n\
             {create}\
             \x20 printf '%s' {index_stderr} >&2\n\
             \x20 ;;\n\
             mem)\n\
             \x20 printf '%s' {mem_stdout}\n\
             \x20 printf '%s' {mem_stderr} >&2\n\
             \x20 ;;\n\
             *)\n\
             \x20 printf '%s' {default_stderr} >&2\n\
             \x20 ;;\n\
             esac\n\
             exit {code}\n",
            calls = sh_quote(&calls.to_string_lossy()),
            create = create,
            index_stderr = sh_quote(&self.index_stderr),
            mem_stdout = sh_quote(&self.mem_stdout),
            mem_stderr = sh_quote(&self.mem_stderr),
            default_stderr = sh_quote(&self.default_stderr),
            code = self.exit_code,
        )
    }

    /// Write the script as `dir/bwa` and make it executable
    #[cfg(unix)]
    pub fn install(&self, dir: &Path) -> Result<InstalledFakeBwa> {
        use std::os::unix::fs::PermissionsExt;

        std::fs::create_dir_all(dir)?;
        let path = dir.join("bwa");
        let calls = dir.join("bwa.calls");

        std::fs::write(&path, self.script(&calls))
            .with_context(|| format!("Failed to write fake bwa to {}", path.display()))?;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;

        Ok(InstalledFakeBwa { path, calls })
    }
}

/// Handle to an installed fake bwa
#[derive(Debug, Clone)]
pub struct InstalledFakeBwa {
    path: PathBuf,
    calls: PathBuf,
}

impl InstalledFakeBwa {
    /// Path of the executable script
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Argument vectors of every invocation so far, oldest first
    pub fn invocations(&self) -> Result<Vec<Vec<String>>> {
        if !self.calls.exists() {
            return Ok(Vec::new());
        }
        let log = std::fs::read_to_string(&self.calls)?;
        Ok(log
            .lines()
            .map(|line| {
                line.split('\t')
                    .filter(|arg| !arg.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .collect())
    }

    /// Argument vector of the most recent invocation
    pub fn last_invocation(&self) -> Result<Vec<String>> {
        self.invocations()?
            .pop()
            .context("fake bwa was never invoked")
    }
}

/// Single-quote a string for /bin/sh
fn sh_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "'\\''"))
}
