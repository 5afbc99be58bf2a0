pub mod operation;

pub use operation::{classify_usage, ToolOperation};
