use super::{require_input, INDEX_MARKER_EXTENSION};
use crate::diagnostics;
use crate::invoker::ExternalTool;
use crate::traits::ToolOperation;
use crate::types::{Classification, InvocationStatus, Operation};
use readmap_bio::count_records;
use readmap_core::{OptionSet, ReadmapError, ReadmapResult};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// `bwa index <reference>`
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexOperation;

impl ToolOperation for IndexOperation {
    fn operation(&self) -> Operation {
        Operation::Index
    }

    fn validate_arguments(&self, arguments: &[PathBuf]) -> ReadmapResult<()> {
        let [reference] = arguments else {
            return Err(ReadmapError::Validation(
                "bwa index needs only 1 parameter".to_string(),
            ));
        };

        require_input(reference)?;
        if count_records(reference)? == 0 {
            return Err(ReadmapError::Validation(format!(
                "{} is not a valid file to index",
                reference.display()
            )));
        }
        Ok(())
    }

    fn classify(&self, _arguments: &[PathBuf], stderr: &str) -> ReadmapResult<Classification> {
        // bwa index reports success for nearly anything else
        if diagnostics::has_index_failure(stderr) {
            tracing::warn!("bwa index could not open its input");
            return Ok(Classification::new(InvocationStatus::Failed));
        }
        Ok(Classification::new(crate::traits::classify_usage(stderr)))
    }
}

pub type BwaIndex = ExternalTool<IndexOperation>;

impl ExternalTool<IndexOperation> {
    /// Index `reference` with the given bwa executable
    pub fn index(bwa: &Path, reference: &Path, options: &OptionSet) -> ReadmapResult<Self> {
        let options = options.clone().with("bwa_path", bwa.to_string_lossy().into_owned());
        Self::new(IndexOperation, options, vec![reference.to_path_buf()])
    }

    /// Whether `reference` already has a bwa index next to it
    pub fn index_exists(reference: &Path) -> bool {
        index_exists(reference)
    }
}

/// Whether the `<reference>.bwt` companion file is present
pub fn index_exists(reference: &Path) -> bool {
    let mut marker = OsString::from(reference.as_os_str());
    marker.push(".");
    marker.push(INDEX_MARKER_EXTENSION);
    Path::new(&marker).exists()
}
