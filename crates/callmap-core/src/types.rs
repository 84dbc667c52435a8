//! Run-level result types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::graph::CallGraph;

/// A file that could not be processed during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    /// Path of the file that failed.
    pub path: PathBuf,
    /// Human-readable reason.
    pub message: String,
}

impl FileFailure {
    /// Creates a new failure record.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FileFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Result of extracting a call graph from a whole source tree.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Merged call graph across every successfully processed file.
    pub graph: CallGraph,
    /// Number of files extracted without error.
    pub files_processed: usize,
    /// Files that were skipped because they could not be read.
    pub failures: Vec<FileFailure>,
}

impl AnalysisResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any file failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
