//! Error types for export.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// Output directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be created or written.
    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
}

impl OutputError {
    pub(crate) fn write(path: &std::path::Path, error: &csv::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, OutputError>;
