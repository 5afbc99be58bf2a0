//! Shared types for readmap crates

pub mod options;

pub use options::{OptionSet, OptionValue};
