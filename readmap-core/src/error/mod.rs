//! Core error types for readmap

use thiserror::Error;

/// Main error type for readmap operations
///
/// `Configuration` and `Validation` are raised before any external process is
/// spawned. The outcome of a tool that did run is never an error; it is an
/// `InvocationStatus` on the invocation result.
#[derive(Error, Debug)]
pub enum ReadmapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The setup is wrong: a required option is missing or the tool cannot be found
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The inputs are wrong: bad arity, missing files, missing index, empty input
    #[error("Validation error: {0}")]
    Validation(String),

    /// A sequence file could not be parsed under its detected format
    #[error("Format error: {0}")]
    Format(String),

    /// The external tool could not be spawned or its output could not be captured
    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for readmap operations
pub type ReadmapResult<T> = Result<T, ReadmapError>;

impl ReadmapError {
    /// Errors caused by the inputs handed to a tool rather than by the setup
    pub fn is_input_error(&self) -> bool {
        matches!(self, ReadmapError::Validation(_) | ReadmapError::Format(_))
    }
}

// Conversion implementations for common error types
impl From<toml::de::Error> for ReadmapError {
    fn from(err: toml::de::Error) -> Self {
        ReadmapError::Configuration(format!("Failed to parse config: {}", err))
    }
}

impl From<serde_json::Error> for ReadmapError {
    fn from(err: serde_json::Error) -> Self {
        ReadmapError::Other(err.to_string())
    }
}

impl From<anyhow::Error> for ReadmapError {
    fn from(err: anyhow::Error) -> Self {
        ReadmapError::Other(err.to_string())
    }
}
