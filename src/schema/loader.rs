//! Schema loader for reading column descriptors from disk
//!
//! A schema file is a JSON array of column descriptors in row order:
//!
//! ```json
//! [
//!   {"name": "id", "type": "integer", "match": "exact"},
//!   {"name": "code", "type": "string", "match": "edge", "max_length": 6}
//! ]
//! ```

use std::fs;
use std::path::Path;

use crate::observability::{log_event_with_fields, Event};

use super::errors::{SchemaError, SchemaResult};
use super::types::{ColumnDescriptor, Schema};

/// Reads schema files into validated [`Schema`] values.
pub struct SchemaLoader;

impl SchemaLoader {
    /// Loads and validates a schema file.
    ///
    /// Unreadable or non-JSON files are FATAL; inconsistent columns are REJECT.
    pub fn load(path: &Path) -> SchemaResult<Schema> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let columns: Vec<ColumnDescriptor> = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed_schema(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        let schema = Schema::from_columns(columns)?;
        let column_count = schema.len().to_string();
        let path_text = path.display().to_string();
        log_event_with_fields(
            Event::SchemaLoaded,
            &[("columns", column_count.as_str()), ("path", path_text.as_str())],
        );
        Ok(schema)
    }

    /// Parses a schema from an in-memory JSON document.
    pub fn from_json_str(json: &str) -> SchemaResult<Schema> {
        let columns: Vec<ColumnDescriptor> = serde_json::from_str(json).map_err(|e| {
            SchemaError::malformed_schema("<in-memory>", format!("Invalid JSON: {}", e))
        })?;

        Schema::from_columns(columns)
    }
}
