//! Dataset ingestion
//!
//! Two input forms are accepted:
//! - CSV with a header row; every cell is raw text coerced by the column's
//!   declared type.
//! - A JSON array of row arrays in schema order, already typed
//!   (`[[134981, 43168.0, 312583, "AZ", "SDRENT", 3.99, "USD", 3.99]]`).
//!   Text cells in typed columns are coerced the same way as CSV cells.
//!
//! Empty cells and `nil`/`null` (any case) become [`FieldValue::Null`].

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde_json::Value;

use crate::datetime::parse_serial;
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{ColumnDescriptor, DataType, Schema};

use super::errors::{DatasetError, DatasetResult};
use super::value::{Dataset, FieldValue, Row};

/// Stored boolean spellings read as false; any other text is true
const STORED_FALSE_LITERALS: &[&str] = &["f", "false", "off", "0"];

/// Reads datasets typed by a schema
pub struct DatasetLoader<'a> {
    schema: &'a Schema,
}

impl<'a> DatasetLoader<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Loads a CSV file with a header row
    pub fn load_csv(&self, path: &Path) -> DatasetResult<Dataset> {
        let dataset = self.read_csv(File::open(path)?)?;
        log_loaded(path, "csv", &dataset);
        Ok(dataset)
    }

    /// Reads CSV from any reader
    pub fn read_csv<R: Read>(&self, reader: R) -> DatasetResult<Dataset> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers = reader.headers()?.clone();
        let positions = self.header_positions(&headers)?;

        let mut rows = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let values = self
                .schema
                .columns()
                .iter()
                .map(|column| {
                    let cell = record.get(positions[column.index]).unwrap_or("");
                    parse_cell(row, column, cell)
                })
                .collect::<DatasetResult<Vec<_>>>()?;
            rows.push(Row::new(values));
        }

        Ok(Dataset::new(rows))
    }

    /// Loads a JSON row-array file
    pub fn load_json(&self, path: &Path) -> DatasetResult<Dataset> {
        let dataset = self.from_json_str(&fs::read_to_string(path)?)?;
        log_loaded(path, "json", &dataset);
        Ok(dataset)
    }

    /// Parses a JSON row-array document
    pub fn from_json_str(&self, json: &str) -> DatasetResult<Dataset> {
        let raw: Vec<Vec<Value>> = serde_json::from_str(json)?;

        let mut rows = Vec::with_capacity(raw.len());
        for (row, cells) in raw.into_iter().enumerate() {
            if cells.len() != self.schema.len() {
                return Err(DatasetError::ArityMismatch {
                    row,
                    expected: self.schema.len(),
                    found: cells.len(),
                });
            }
            let values = self
                .schema
                .columns()
                .iter()
                .zip(cells)
                .map(|(column, cell)| json_cell(row, column, cell))
                .collect::<DatasetResult<Vec<_>>>()?;
            rows.push(Row::new(values));
        }

        Ok(Dataset::new(rows))
    }

    /// Maps each schema column to its position in the header
    fn header_positions(&self, headers: &StringRecord) -> DatasetResult<Vec<usize>> {
        if let Some(unknown) = headers
            .iter()
            .find(|name| self.schema.column_by_name(name).is_none())
        {
            return Err(DatasetError::UnknownColumn {
                column: unknown.to_string(),
            });
        }

        self.schema
            .columns()
            .iter()
            .map(|column| {
                headers
                    .iter()
                    .position(|name| name == column.name)
                    .ok_or_else(|| DatasetError::MissingColumn {
                        column: column.name.clone(),
                    })
            })
            .collect()
    }
}

fn log_loaded(path: &Path, format: &str, dataset: &Dataset) {
    let rows = dataset.len().to_string();
    let path_text = path.display().to_string();
    log_event_with_fields(
        Event::DatasetLoaded,
        &[
            ("format", format),
            ("path", path_text.as_str()),
            ("rows", rows.as_str()),
        ],
    );
}

fn is_null_text(text: &str) -> bool {
    text.is_empty() || text.eq_ignore_ascii_case("nil") || text.eq_ignore_ascii_case("null")
}

/// Coerces one raw text cell by its column's type
fn parse_cell(row: usize, column: &ColumnDescriptor, cell: &str) -> DatasetResult<FieldValue> {
    let text = cell.trim();
    if is_null_text(text) {
        return Ok(FieldValue::Null);
    }

    let invalid = |expected: &'static str| DatasetError::InvalidValue {
        row,
        column: column.name.clone(),
        value: format!("'{}'", text),
        expected,
    };

    match column.data_type {
        DataType::String => Ok(FieldValue::Text(text.to_string())),
        DataType::Integer => text
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|_| invalid("integer")),
        DataType::Decimal => text
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite())
            .map(FieldValue::Decimal)
            .ok_or_else(|| invalid("decimal")),
        DataType::Boolean => {
            let lowered = text.to_lowercase();
            Ok(FieldValue::Boolean(
                !STORED_FALSE_LITERALS.contains(&lowered.as_str()),
            ))
        }
        DataType::Date | DataType::DateTime | DataType::Time => parse_serial(text, column.data_type)
            .map(FieldValue::Serial)
            .ok_or_else(|| invalid(column.data_type.type_name())),
    }
}

/// Converts one JSON cell, accepting text for any column type
fn json_cell(row: usize, column: &ColumnDescriptor, cell: Value) -> DatasetResult<FieldValue> {
    let invalid = |value: &Value| DatasetError::InvalidValue {
        row,
        column: column.name.clone(),
        value: value.to_string(),
        expected: column.data_type.type_name(),
    };

    match (column.data_type, cell) {
        (_, Value::Null) => Ok(FieldValue::Null),
        (_, Value::String(text)) => parse_cell(row, column, &text),
        (DataType::String, Value::Number(n)) => Ok(FieldValue::Text(n.to_string())),
        (DataType::Integer, Value::Number(n)) => {
            n.as_i64().map(FieldValue::Integer).ok_or_else(|| invalid(&Value::Number(n)))
        }
        (DataType::Decimal, Value::Number(n)) => {
            n.as_f64().map(FieldValue::Decimal).ok_or_else(|| invalid(&Value::Number(n)))
        }
        (DataType::Date | DataType::DateTime | DataType::Time, Value::Number(n)) => {
            n.as_f64().map(FieldValue::Serial).ok_or_else(|| invalid(&Value::Number(n)))
        }
        (DataType::Boolean, Value::Bool(b)) => Ok(FieldValue::Boolean(b)),
        (_, other) => Err(invalid(&other)),
    }
}
