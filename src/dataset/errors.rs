//! Dataset ingestion errors

use thiserror::Error;

/// Error type for dataset loading.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// IO error from file operations.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// CSV parsing error.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// JSON parsing error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Header names a column the schema does not declare.
    #[error("header column '{column}' is not in the schema")]
    UnknownColumn { column: String },
    /// Schema column absent from the header.
    #[error("schema column '{column}' is missing from the header")]
    MissingColumn { column: String },
    /// Row has the wrong number of fields.
    #[error("row {row} has {found} fields, expected {expected}")]
    ArityMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Field cannot be read as its column's type.
    #[error("row {row}, column '{column}': cannot read {value} as {expected}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },
}

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
