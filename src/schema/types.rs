//! Schema type definitions
//!
//! Supported column types:
//! - string: UTF-8 text
//! - integer: 64-bit signed integer
//! - decimal: 64-bit floating point
//! - date, datetime, time: stored as day-serials
//! - boolean

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult};

/// Declared data type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// UTF-8 text
    String,
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point
    Decimal,
    /// Calendar date, stored as a whole day-serial
    Date,
    /// Date with time of day, stored as a fractional day-serial
    DateTime,
    /// Time of day, stored as a fraction of one day
    Time,
    /// Boolean
    Boolean,
}

impl DataType {
    /// Returns the type name for messages and explain output
    pub fn type_name(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Integer => "integer",
            DataType::Decimal => "decimal",
            DataType::Date => "date",
            DataType::DateTime => "datetime",
            DataType::Time => "time",
            DataType::Boolean => "boolean",
        }
    }

    /// Returns true for integer and decimal columns
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Decimal)
    }

    /// Returns true for date, datetime and time columns
    pub fn is_temporal(&self) -> bool {
        matches!(self, DataType::Date | DataType::DateTime | DataType::Time)
    }
}

/// How query tokens are compared against a column.
///
/// Variant order is the planner's priority order: cheaper, more
/// selective disciplines sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchDiscipline {
    /// Column is never searched
    Off,
    /// Whole-value equality
    Exact,
    /// Value starts with the token
    StartsWith,
    /// Token starts on a word boundary inside the value
    Edge,
    /// Token occurs anywhere inside the value
    Contains,
}

impl MatchDiscipline {
    /// Returns the priority rank used to order a plan
    pub fn rank(&self) -> u8 {
        match self {
            MatchDiscipline::Off => 0,
            MatchDiscipline::Exact => 1,
            MatchDiscipline::StartsWith => 2,
            MatchDiscipline::Edge => 3,
            MatchDiscipline::Contains => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchDiscipline::Off => "off",
            MatchDiscipline::Exact => "exact",
            MatchDiscipline::StartsWith => "starts_with",
            MatchDiscipline::Edge => "edge",
            MatchDiscipline::Contains => "contains",
        }
    }
}

/// Three-valued column fact: not yet known, known true, known false.
///
/// Serialized as a nullable boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum TriState {
    #[default]
    Unknown,
    Yes,
    No,
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => TriState::Unknown,
            Some(true) => TriState::Yes,
            Some(false) => TriState::No,
        }
    }
}

impl From<TriState> for Option<bool> {
    fn from(value: TriState) -> Self {
        match value {
            TriState::Unknown => None,
            TriState::Yes => Some(true),
            TriState::No => Some(false),
        }
    }
}

/// Column descriptor: type, match discipline and bound metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,
    /// Position of the column's value inside a row (assigned by the schema)
    #[serde(default, skip_serializing)]
    pub index: usize,
    /// Declared data type
    #[serde(rename = "type")]
    pub data_type: DataType,
    /// Match discipline
    #[serde(rename = "match")]
    pub match_discipline: MatchDiscipline,
    /// Lower numeric bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    /// Upper numeric bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    /// Shortest stored string, in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Longest stored string, in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Every stored value is lowercase
    #[serde(default)]
    pub is_all_lower: bool,
    /// Every stored value is uppercase
    #[serde(default)]
    pub is_all_upper: bool,
    /// Whether stored values may start with a digit
    #[serde(default)]
    pub contains_numeric_start: TriState,
    /// Whether a stored value may contain internal whitespace
    #[serde(default)]
    pub contains_multiple_words: TriState,
    /// strftime pattern for non-exact date/time comparisons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_display_format: Option<String>,
}

impl ColumnDescriptor {
    /// Creates a column with no bounds and unknown string facts
    pub fn new(name: impl Into<String>, data_type: DataType, match_discipline: MatchDiscipline) -> Self {
        Self {
            name: name.into(),
            index: 0,
            data_type,
            match_discipline,
            min_value: None,
            max_value: None,
            min_length: None,
            max_length: None,
            is_all_lower: false,
            is_all_upper: false,
            contains_numeric_start: TriState::Unknown,
            contains_multiple_words: TriState::Unknown,
            date_display_format: None,
        }
    }

    /// Sets numeric bounds
    pub fn with_value_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    /// Sets string length bounds
    pub fn with_length_bounds(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Declares every stored value lowercase
    pub fn all_lower(mut self) -> Self {
        self.is_all_lower = true;
        self
    }

    /// Declares every stored value uppercase
    pub fn all_upper(mut self) -> Self {
        self.is_all_upper = true;
        self
    }

    pub fn with_numeric_start(mut self, value: TriState) -> Self {
        self.contains_numeric_start = value;
        self
    }

    pub fn with_multiple_words(mut self, value: TriState) -> Self {
        self.contains_multiple_words = value;
        self
    }

    pub fn with_display_format(mut self, format: impl Into<String>) -> Self {
        self.date_display_format = Some(format.into());
        self
    }

    /// Returns true if the column declares a case convention
    pub fn has_case_convention(&self) -> bool {
        self.is_all_lower || self.is_all_upper
    }

    /// Applies the column's case convention to a query string
    pub fn apply_case(&self, text: &str) -> String {
        if self.is_all_upper {
            text.to_uppercase()
        } else if self.is_all_lower {
            text.to_lowercase()
        } else {
            text.to_string()
        }
    }

    /// Normalizes a stored string for comparison with lowercased tokens
    pub fn normalize_stored(&self, text: &str) -> String {
        if self.has_case_convention() {
            text.to_string()
        } else {
            text.to_lowercase()
        }
    }

    /// Returns true if a stored value may span several words, so one
    /// column can satisfy several tokens
    pub fn is_multi_word_capable(&self) -> bool {
        self.data_type == DataType::String && self.contains_multiple_words != TriState::No
    }

    /// Returns true if whole-value phrase clauses fully cover this column
    pub fn handled_by_phrase_clause(&self) -> bool {
        self.match_discipline == MatchDiscipline::Exact
            && (matches!(self.data_type, DataType::Date | DataType::DateTime)
                || (self.data_type == DataType::String
                    && self.contains_multiple_words == TriState::Yes))
    }

    /// Validates the descriptor's internal consistency
    pub fn validate(&self) -> SchemaResult<()> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::invalid_schema("Column name must not be empty"));
        }
        if self.is_all_lower && self.is_all_upper {
            return Err(SchemaError::invalid_column(
                &self.name,
                "is_all_lower and is_all_upper are mutually exclusive",
            ));
        }
        if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
            if min > max {
                return Err(SchemaError::invalid_column(
                    &self.name,
                    format!("min_value {} exceeds max_value {}", min, max),
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(SchemaError::invalid_column(
                    &self.name,
                    format!("min_length {} exceeds max_length {}", min, max),
                ));
            }
        }
        Ok(())
    }
}

/// Ordered set of column descriptors.
///
/// Column `i` describes the `i`th value of every row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schema {
    columns: Vec<ColumnDescriptor>,
}

impl Schema {
    /// Builds a schema, assigning positional indexes and validating every column
    pub fn from_columns(columns: Vec<ColumnDescriptor>) -> SchemaResult<Self> {
        let mut seen = HashSet::new();
        let mut indexed = Vec::with_capacity(columns.len());

        for (index, mut column) in columns.into_iter().enumerate() {
            column.validate()?;
            if !seen.insert(column.name.clone()) {
                return Err(SchemaError::invalid_column(&column.name, "duplicate column name"));
            }
            column.index = index;
            indexed.push(column);
        }

        if indexed.is_empty() {
            return Err(SchemaError::invalid_schema("Schema must define at least one column"));
        }

        Ok(Self { columns: indexed })
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Looks up a column by row position
    pub fn column(&self, index: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(index)
    }

    /// Looks up a column by name
    pub fn column_by_name(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
