//! The bwa subcommands readmap drives

mod align;
mod index;

pub use align::{AlignOperation, BwaMem};
pub use index::{index_exists, BwaIndex, IndexOperation};

use readmap_core::{ReadmapError, ReadmapResult};
use std::path::Path;

/// Companion file whose presence marks a reference as indexed
pub(crate) const INDEX_MARKER_EXTENSION: &str = "bwt";

fn require_input(path: &Path) -> ReadmapResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ReadmapError::Validation(format!(
            "{} is not a valid input file",
            path.display()
        )))
    }
}
