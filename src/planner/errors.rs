//! Planner error types
//!
//! Error codes:
//! - SEARCH_MALFORMED_TOKEN (SKIP)
//! - SEARCH_UNPARSEABLE_DATE (SKIP)
//! - SEARCH_TYPE_COERCION (SKIP)
//! - SEARCH_SCHEMA_REFERENCE (REJECT)
//!
//! SKIP errors never abort planning. They are recorded on the plan as
//! diagnostics and the offending token, phrase or (token, column) pair is
//! left out of the plan.

use std::fmt;

/// Severity levels for planner errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Input dropped from planning, query continues
    Skip,
    /// Query rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Skip => write!(f, "SKIP"),
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Planner-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerErrorCode {
    /// Token violates tokenizer invariants
    SearchMalformedToken,
    /// Date/time phrase failed calendar parsing
    SearchUnparseableDate,
    /// Token cannot be coerced to a column's type
    SearchTypeCoercion,
    /// Clause refers to a column the schema does not have
    SearchSchemaReference,
}

impl PlannerErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            PlannerErrorCode::SearchMalformedToken => "SEARCH_MALFORMED_TOKEN",
            PlannerErrorCode::SearchUnparseableDate => "SEARCH_UNPARSEABLE_DATE",
            PlannerErrorCode::SearchTypeCoercion => "SEARCH_TYPE_COERCION",
            PlannerErrorCode::SearchSchemaReference => "SEARCH_SCHEMA_REFERENCE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            PlannerErrorCode::SearchSchemaReference => Severity::Reject,
            _ => Severity::Skip,
        }
    }
}

impl fmt::Display for PlannerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Planner error type with full context
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerError {
    /// Error code
    code: PlannerErrorCode,
    /// Human-readable message
    message: String,
    /// Column name if applicable
    column: Option<String>,
}

impl PlannerError {
    /// Create a malformed token error
    pub fn malformed_token(token: &str) -> Self {
        Self {
            code: PlannerErrorCode::SearchMalformedToken,
            message: format!("Token '{}' is not a normalized query word", token),
            column: None,
        }
    }

    /// Create an unparseable date phrase error
    pub fn unparseable_date(column: impl Into<String>, phrase: &str) -> Self {
        let c = column.into();
        Self {
            code: PlannerErrorCode::SearchUnparseableDate,
            message: format!("Phrase '{}' is not a valid {} value", phrase, c),
            column: Some(c),
        }
    }

    /// Create a type coercion error for one (token, column) pair
    pub fn type_coercion(column: impl Into<String>, token: &str, reason: impl Into<String>) -> Self {
        let c = column.into();
        Self {
            code: PlannerErrorCode::SearchTypeCoercion,
            message: format!(
                "Token '{}' cannot be compared against '{}': {}",
                token,
                c,
                reason.into()
            ),
            column: Some(c),
        }
    }

    /// Create a schema reference error
    pub fn schema_reference(column: impl Into<String>, index: usize) -> Self {
        let c = column.into();
        Self {
            code: PlannerErrorCode::SearchSchemaReference,
            message: format!("Column '{}' at position {} is not in the schema", c, index),
            column: Some(c),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> PlannerErrorCode {
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

    /// Returns the column name if applicable
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Returns whether this error aborts the query
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Reject
    }
}

impl fmt::Display for PlannerError {
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

impl std::error::Error for PlannerError {}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            PlannerErrorCode::SearchMalformedToken.code(),
            "SEARCH_MALFORMED_TOKEN"
        );
        assert_eq!(
            PlannerErrorCode::SearchUnparseableDate.code(),
            "SEARCH_UNPARSEABLE_DATE"
        );
        assert_eq!(
            PlannerErrorCode::SearchTypeCoercion.code(),
            "SEARCH_TYPE_COERCION"
        );
        assert_eq!(
            PlannerErrorCode::SearchSchemaReference.code(),
            "SEARCH_SCHEMA_REFERENCE"
        );
    }

    #[test]
    fn test_skip_errors_are_not_fatal() {
        assert!(!PlannerError::malformed_token("A B").is_fatal());
        assert!(!PlannerError::unparseable_date("date", "13/45/18").is_fatal());
        assert!(!PlannerError::type_coercion("id", "1e30", "out of range").is_fatal());
    }

    #[test]
    fn test_schema_reference_is_fatal() {
        let err = PlannerError::schema_reference("missing", 9);
        assert!(err.is_fatal());
        assert_eq!(err.column(), Some("missing"));
    }

    #[test]
    fn test_error_display() {
        let err = PlannerError::unparseable_date("date", "13/45/18");
        let display = format!("{}", err);
        assert!(display.starts_with("[SKIP] SEARCH_UNPARSEABLE_DATE:"));
        assert!(display.contains("13/45/18"));
    }
}
