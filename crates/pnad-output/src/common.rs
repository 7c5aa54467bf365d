//! Shared export helpers.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OutputError, Result};

/// One exported column: the header written to the file and the record
/// field it is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputColumn {
    pub header: String,
    pub field: String,
}

impl OutputColumn {
    pub fn new(header: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            field: field.into(),
        }
    }

    /// Column whose header is the field name itself.
    pub fn same(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            header: field.clone(),
            field,
        }
    }
}

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
