//! Finding the bwa executable

use crate::diagnostics::parse_version;
use readmap_core::{ReadmapError, ReadmapResult};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Environment variable naming the bwa executable
pub const BWA_ENV: &str = "READMAP_BWA";

/// Resolve the bwa executable
///
/// Order: the explicit path, then `READMAP_BWA`, then `bwa` on `PATH`.
pub fn locate_bwa(explicit: Option<&Path>) -> ReadmapResult<PathBuf> {
    if let Some(path) = explicit {
        return existing(path.to_path_buf(), "configured bwa path");
    }

    if let Some(value) = std::env::var_os(BWA_ENV).filter(|v| !v.is_empty()) {
        return existing(PathBuf::from(value), BWA_ENV);
    }

    which::which("bwa").map_err(|_| {
        ReadmapError::Configuration(format!(
            "bwa was not found on PATH; set [bwa] path in the config, {} or --bwa-path",
            BWA_ENV
        ))
    })
}

fn existing(path: PathBuf, source: &str) -> ReadmapResult<PathBuf> {
    if path.exists() {
        tracing::debug!("Using bwa from {}: {}", source, path.display());
        Ok(path)
    } else {
        Err(ReadmapError::Configuration(format!(
            "{} is not a valid bwa path ({})",
            path.display(),
            source
        )))
    }
}

/// Version bwa reports when run without arguments
pub fn tool_version(path: &Path) -> ReadmapResult<Option<String>> {
    let output = Command::new(path)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| ReadmapError::Tool(format!("Failed to run {}: {}", path.display(), e)))?;

    Ok(parse_version(&String::from_utf8_lossy(&output.stderr)))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use readmap_test::{FakeBwa, TestEnvironment};
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_explicit_path_wins() {
        let env = TestEnvironment::new().unwrap();
        let fake = FakeBwa::new().install(&env.tools_dir()).unwrap();
        std::env::set_var(BWA_ENV, "/nonexistent/bwa");

        assert_eq!(locate_bwa(Some(fake.path())).unwrap(), fake.path());
    }

    #[test]
    #[serial]
    fn test_missing_explicit_path() {
        let _env = TestEnvironment::new().unwrap();
        let result = locate_bwa(Some(Path::new("/nonexistent/bwa")));
        assert!(matches!(result, Err(ReadmapError::Configuration(_))));
    }

    #[test]
    #[serial]
    fn test_environment_variable() {
        let env = TestEnvironment::new().unwrap();
        let fake = FakeBwa::new().install(&env.tools_dir()).unwrap();
        std::env::set_var(BWA_ENV, fake.path());

        assert_eq!(locate_bwa(None).unwrap(), fake.path());
    }

    #[test]
    #[serial]
    fn test_search_path() {
        let env = TestEnvironment::new().unwrap();
        let fake = FakeBwa::new().install(&env.tools_dir()).unwrap();
        let saved = std::env::var_os("PATH");
        std::env::set_var("PATH", env.tools_dir());

        let located = locate_bwa(None);

        match saved {
            Some(path) => std::env::set_var("PATH", path),
            None => std::env::remove_var("PATH"),
        }
        assert_eq!(located.unwrap(), fake.path());
    }

    #[test]
    #[serial]
    fn test_nothing_found() {
        let env = TestEnvironment::new().unwrap();
        let saved = std::env::var_os("PATH");
        std::env::set_var("PATH", env.tools_dir());

        let located = locate_bwa(None);

        match saved {
            Some(path) => std::env::set_var("PATH", path),
            None => std::env::remove_var("PATH"),
        }
        assert!(matches!(located, Err(ReadmapError::Configuration(_))));
    }

    #[test]
    #[serial]
    fn test_tool_version() {
        let env = TestEnvironment::new().unwrap();
        let fake = FakeBwa::new().install(&env.tools_dir()).unwrap();

        assert_eq!(tool_version(fake.path()).unwrap(), Some("0.7.17-r1188".to_string()));
    }
}
