//! Configuration types for readmap

use crate::types::OptionSet;
use crate::ReadmapError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub bwa: BwaConfig,
    /// Options passed to `bwa index`
    #[serde(default)]
    pub index: OptionSet,
    /// Default options passed to `bwa mem`
    #[serde(default)]
    pub mem: OptionSet,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BwaConfig {
    /// Explicit path to the bwa executable
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Default alignment output file
    #[serde(default = "default_alignment")]
    pub alignment: PathBuf,
    /// File name for concatenated reads inside the work directory
    #[serde(default = "default_reads")]
    pub reads: String,
    /// File name for concatenated mates inside the work directory
    #[serde(default = "default_mates")]
    pub mates: String,
}

// Default value functions
fn default_alignment() -> PathBuf { PathBuf::from("bwa.sai") }
fn default_reads() -> String { "reads.fastq".to_string() }
fn default_mates() -> String { "mates.fastq".to_string() }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            alignment: default_alignment(),
            reads: default_reads(),
            mates: default_mates(),
        }
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ReadmapError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), ReadmapError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| ReadmapError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Resolve the configuration for a run
///
/// An explicit path must exist. Without one, the default config location is
/// used when present and built-in defaults otherwise.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config, ReadmapError> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ReadmapError::Configuration(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        tracing::debug!("Loading config from {}", path.display());
        return load_config(path);
    }

    let default_path = crate::system::paths::default_config_path();
    if default_path.exists() {
        tracing::debug!("Loading config from {}", default_path.display());
        load_config(&default_path)
    } else {
        Ok(default_config())
    }
}
