pub mod paths;

// Re-export commonly used functions
pub use paths::{default_config_path, describe_paths, readmap_home, readmap_work_dir};
