//! Comparison clauses: the unit of a query plan

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::schema::{DataType, MatchDiscipline};

/// Value a clause compares a field against
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ComparisonValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    /// Day-serial of a date, date-time or time
    Serial(f64),
    Boolean(bool),
}

impl ComparisonValue {
    fn key(&self) -> ValueKey {
        match self {
            ComparisonValue::Text(s) => ValueKey::Text(s.clone()),
            ComparisonValue::Integer(i) => ValueKey::Integer(*i),
            ComparisonValue::Decimal(d) => ValueKey::Decimal(d.to_bits()),
            ComparisonValue::Serial(s) => ValueKey::Serial(s.to_bits()),
            ComparisonValue::Boolean(b) => ValueKey::Boolean(*b),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ComparisonValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ComparisonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonValue::Text(s) => write!(f, "{:?}", s),
            ComparisonValue::Integer(i) => write!(f, "{}", i),
            ComparisonValue::Decimal(d) => write!(f, "{}", d),
            ComparisonValue::Serial(s) => write!(f, "serial({})", s),
            ComparisonValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Hashable image of a comparison value. Floats hash by bit pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ValueKey {
    Text(String),
    Integer(i64),
    Decimal(u64),
    Serial(u64),
    Boolean(bool),
}

/// Identity of a clause for deduplication
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClauseKey {
    column: usize,
    discipline: MatchDiscipline,
    data_type: DataType,
    value: ValueKey,
}

/// One comparison of a column against a value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clause {
    /// Position of the column in the schema and in every row
    pub column: usize,
    /// Column name
    pub field: String,
    pub discipline: MatchDiscipline,
    pub data_type: DataType,
    pub value: ComparisonValue,
    /// Query tokens satisfied when this clause matches
    pub tokens: BTreeSet<String>,
    /// Exact string clause that may fall back to a word-boundary match
    pub allow_incomplete_match: bool,
}

impl Clause {
    pub fn key(&self) -> ClauseKey {
        ClauseKey {
            column: self.column,
            discipline: self.discipline,
            data_type: self.data_type,
            value: self.value.key(),
        }
    }

    /// Number of tokens this clause consumes
    pub fn width(&self) -> usize {
        self.tokens.len()
    }
}
