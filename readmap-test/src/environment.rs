//! Test environment management
//!
//! Provides isolated test environments with automatic cleanup using RAII.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Variables that would leak the developer's own setup into a test
const ISOLATED_VARS: &[&str] = &["READMAP_BWA", "READMAP_CONFIG", "READMAP_LOG"];

/// Isolated test environment with automatic cleanup
///
/// Environment variables are process-wide: tests that create an environment
/// and read `READMAP_*` variables should run under `#[serial]`.
pub struct TestEnvironment {
    /// Removed on drop
    _temp_dir: TempDir,
    /// Path to the test environment root
    root_path: PathBuf,
    /// Saved environment variables for restoration
    saved_env: HashMap<String, Option<String>>,
}

impl TestEnvironment {
    /// Create a new environment and point the READMAP_* variables at it
    pub fn new() -> Result<Self> {
        let temp_dir =
            TempDir::with_prefix("readmap-test").context("Failed to create temporary directory")?;

        let root_path = temp_dir.path().to_path_buf();

        // Create standard subdirectories
        std::fs::create_dir_all(root_path.join("home"))?;
        std::fs::create_dir_all(root_path.join("reads"))?;
        std::fs::create_dir_all(root_path.join("tools"))?;
        std::fs::create_dir_all(root_path.join("work"))?;

        let mut env = Self {
            _temp_dir: temp_dir,
            root_path,
            saved_env: HashMap::new(),
        };

        env.setup_environment();

        Ok(env)
    }

    /// Set up isolated environment variables
    fn setup_environment(&mut self) {
        let home_path = self.home_dir().to_string_lossy().to_string();
        let work_path = self.work_dir().to_string_lossy().to_string();

        for (key, value) in [("READMAP_HOME", home_path), ("READMAP_WORK_DIR", work_path)] {
            self.saved_env.insert(key.to_string(), std::env::var(key).ok());
            std::env::set_var(key, value);
        }

        for key in ISOLATED_VARS {
            self.saved_env.insert(key.to_string(), std::env::var(key).ok());
            std::env::remove_var(key);
        }
    }

    /// Get the root path of the test environment
    pub fn root(&self) -> &Path {
        &self.root_path
    }

    /// Directory used as READMAP_HOME
    pub fn home_dir(&self) -> PathBuf {
        self.root_path.join("home")
    }

    /// Directory for read files
    pub fn reads_dir(&self) -> PathBuf {
        self.root_path.join("reads")
    }

    /// Directory for fake tool executables
    pub fn tools_dir(&self) -> PathBuf {
        self.root_path.join("tools")
    }

    /// Directory used as READMAP_WORK_DIR
    pub fn work_dir(&self) -> PathBuf {
        self.root_path.join("work")
    }

    /// Absolute path of a file inside the environment
    pub fn path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.root_path.join(name)
    }

    /// Write a file in the test environment, returning its absolute path
    pub fn write_file(&self, path: impl AsRef<Path>, content: &[u8]) -> Result<PathBuf> {
        let full_path = self.root_path.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full_path, content)?;
        Ok(full_path)
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        // Restore environment variables
        for (key, value) in &self.saved_env {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}
