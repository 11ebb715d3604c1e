//! Executor error types
//!
//! Error codes:
//! - SEARCH_SCHEMA_REFERENCE (REJECT)
//! - SEARCH_SCAN_CANCELLED (ERROR)
//! - SEARCH_DEADLINE_EXCEEDED (ERROR)

use std::fmt;

/// Severity levels for executor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Query rejected before producing results
    Reject,
    /// Operation failed but the engine is healthy
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Executor-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorErrorCode {
    /// Clause or row refers to a column position that does not exist
    SearchSchemaReference,
    /// Scan stopped by its cancellation token
    SearchScanCancelled,
    /// Scan ran past its deadline
    SearchDeadlineExceeded,
}

impl ExecutorErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorErrorCode::SearchSchemaReference => "SEARCH_SCHEMA_REFERENCE",
            ExecutorErrorCode::SearchScanCancelled => "SEARCH_SCAN_CANCELLED",
            ExecutorErrorCode::SearchDeadlineExceeded => "SEARCH_DEADLINE_EXCEEDED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            ExecutorErrorCode::SearchSchemaReference => Severity::Reject,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for ExecutorErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Executor error type with full context
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorError {
    /// Error code
    code: ExecutorErrorCode,
    /// Human-readable message
    message: String,
    /// Row position if applicable
    row: Option<usize>,
}

impl ExecutorError {
    /// Create an error for a clause whose column the schema lacks
    pub fn unknown_column(field: &str, column: usize) -> Self {
        Self {
            code: ExecutorErrorCode::SearchSchemaReference,
            message: format!("Clause on '{}' refers to missing column {}", field, column),
            row: None,
        }
    }

    /// Create an error for a row without the referenced position
    pub fn missing_field(row: usize, field: &str, column: usize) -> Self {
        Self {
            code: ExecutorErrorCode::SearchSchemaReference,
            message: format!(
                "Row {} has no value at position {} ('{}')",
                row, column, field
            ),
            row: Some(row),
        }
    }

    /// Create a cancelled-scan error
    pub fn cancelled(rows_scanned: usize) -> Self {
        Self {
            code: ExecutorErrorCode::SearchScanCancelled,
            message: format!("Scan cancelled after {} rows", rows_scanned),
            row: None,
        }
    }

    /// Create a deadline error
    pub fn deadline_exceeded(rows_scanned: usize) -> Self {
        Self {
            code: ExecutorErrorCode::SearchDeadlineExceeded,
            message: format!("Scan deadline passed after {} rows", rows_scanned),
            row: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ExecutorErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the row position if applicable
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Returns whether the scan was interrupted rather than broken
    pub fn is_interrupt(&self) -> bool {
        matches!(
            self.code,
            ExecutorErrorCode::SearchScanCancelled | ExecutorErrorCode::SearchDeadlineExceeded
        )
    }
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for ExecutorError {}

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;
