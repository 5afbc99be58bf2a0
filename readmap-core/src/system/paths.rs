use std::path::PathBuf;

/// Get the readmap home directory
/// Checks READMAP_HOME environment variable, falls back to ${HOME}/.readmap
pub fn readmap_home() -> PathBuf {
    if let Ok(path) = std::env::var("READMAP_HOME") {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".readmap")
}

/// Get the default configuration file path
/// Checks READMAP_CONFIG environment variable, falls back to READMAP_HOME/config.toml
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("READMAP_CONFIG") {
        PathBuf::from(path)
    } else {
        readmap_home().join("config.toml")
    }
}

/// Get the directory used for intermediate files of a mapping run
/// Checks READMAP_WORK_DIR environment variable, falls back to the current directory
pub fn readmap_work_dir() -> PathBuf {
    if let Ok(path) = std::env::var("READMAP_WORK_DIR") {
        PathBuf::from(path)
    } else {
        PathBuf::from(".")
    }
}

/// Describe the resolved paths, for diagnostics output
pub fn describe_paths() -> String {
    format!(
        "readmap paths:\n  home:   {}\n  config: {}\n  work:   {}",
        readmap_home().display(),
        default_config_path().display(),
        readmap_work_dir().display()
    )
}
