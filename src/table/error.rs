//! Error types for table reading and writing.

use std::path::Path;

use thiserror::Error;

/// Errors that can occur while reading or appending tables.
#[derive(Debug, Clone, Error)]
pub enum TableError {
    /// Filesystem failure opening, reading or writing a table
    #[error("io error on '{path}': {message}")]
    Io {
        /// Table path
        path: String,
        /// Underlying IO error text
        message: String,
    },

    /// The file is not valid comma-separated text
    #[error("invalid CSV in '{path}': {message}")]
    Csv {
        /// Table path
        path: String,
        /// Parser error text
        message: String,
    },

    /// The header row lacks a column the loader depends on
    #[error(
        "column '{column}' not found in '{path}'\n  Suggestion: Add a header row containing '{column}'"
    )]
    MissingColumn {
        /// Table path
        path: String,
        /// Required column name
        column: String,
    },

    /// A row does not carry one count per year of the configured range
    #[error("row for journal '{journal}' has {actual} counts, expected {expected}")]
    RowLength {
        /// Journal of the rejected row
        journal: String,
        /// Years in the configured range
        expected: usize,
        /// Counts supplied
        actual: usize,
    },
}

impl TableError {
    pub(crate) fn io(path: &Path, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn csv(path: &Path, err: &csv::Error) -> Self {
        Self::Csv {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn missing_column(path: &Path, column: &str) -> Self {
        Self::MissingColumn {
            path: path.display().to_string(),
            column: column.to_string(),
        }
    }
}
