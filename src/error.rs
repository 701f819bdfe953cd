// src/error.rs
use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Base name is empty once path-hostile characters are removed.
    #[error("invalid base name {0:?}")]
    InvalidBaseName(String),

    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("spreadsheet encoding failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("table does not fit a worksheet ({rows} rows, {cols} columns)")]
    SheetLimit { rows: usize, cols: usize },

    /// One cell is longer than a worksheet cell can hold. `record` is the
    /// zero-based position in the batch.
    #[error("record {record}, column {column:?}: {chars} characters exceed the {limit}-character cell limit")]
    CellTooLong { record: usize, column: String, chars: usize, limit: usize },

    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    /// True for failures of the data itself rather than the filesystem.
    pub fn is_serialization(&self) -> bool {
        matches!(
            self,
            ExportError::Serialize(_)
                | ExportError::Spreadsheet(_)
                | ExportError::SheetLimit { .. }
                | ExportError::CellTooLong { .. }
        )
    }
}
