//! Schema error types
//!
//! Error codes:
//! - SEARCH_SCHEMA_INVALID (REJECT)
//! - SEARCH_SCHEMA_MALFORMED (FATAL)

use std::fmt;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Schema rejected, caller must fix it
    Reject,
    /// Schema file unusable, the session cannot start
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// A column descriptor is internally inconsistent
    SearchSchemaInvalid,
    /// Schema file missing, unreadable or not valid JSON
    SearchSchemaMalformed,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::SearchSchemaInvalid => "SEARCH_SCHEMA_INVALID",
            SchemaErrorCode::SearchSchemaMalformed => "SEARCH_SCHEMA_MALFORMED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::SearchSchemaInvalid => Severity::Reject,
            SchemaErrorCode::SearchSchemaMalformed => Severity::Fatal,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error type with full context
#[derive(Debug, Clone)]
pub struct SchemaError {
    /// Error code
    code: SchemaErrorCode,
    /// Human-readable message
    message: String,
    /// Column name if applicable
    column: Option<String>,
}

impl SchemaError {
    /// Create an invalid column error
    pub fn invalid_column(column: impl Into<String>, reason: impl Into<String>) -> Self {
        let column = column.into();
        Self {
            code: SchemaErrorCode::SearchSchemaInvalid,
            message: format!("Column '{}': {}", column, reason.into()),
            column: Some(column),
        }
    }

    /// Create an invalid schema error not tied to a single column
    pub fn invalid_schema(reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::SearchSchemaInvalid,
            message: reason.into(),
            column: None,
        }
    }

    /// Create an error for a malformed schema file
    pub fn malformed_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::SearchSchemaMalformed,
            message: format!("Malformed schema file '{}': {}", path.into(), reason.into()),
            column: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
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

    /// Returns the offending column if applicable
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
