//! Core utilities and types shared across all readmap crates

pub mod config;
pub mod error;
pub mod system;
pub mod types;

// Re-export commonly used types
pub use config::{load_config, resolve_config, save_config, Config};
pub use error::{ReadmapError, ReadmapResult};
pub use types::{OptionSet, OptionValue};

// Re-export system utilities
pub use system::{default_config_path, readmap_home, readmap_work_dir};

/// Version information for the readmap project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
