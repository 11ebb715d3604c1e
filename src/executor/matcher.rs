//! Clause evaluation against a single field
//!
//! Numbers compare numerically under `exact` and textually otherwise.
//! Text comparisons run against the field's coerced form:
//! - strings without a case convention are lowercased;
//! - temporal serials render through the column's display format;
//! - numbers render in their natural decimal form.

use std::collections::HashMap;

use crate::dataset::FieldValue;
use crate::datetime::{render_serial, SERIAL_EPSILON};
use crate::planner::{Clause, ComparisonValue};
use crate::schema::{ColumnDescriptor, MatchDiscipline};

/// Outcome of one clause against one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Miss,
    Hit,
    /// Matched only through the word-boundary fallback of an incomplete
    /// exact clause; the row must be verified before it is accepted
    Incomplete,
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        !matches!(self, MatchOutcome::Miss)
    }

    fn from_bool(hit: bool) -> Self {
        if hit {
            MatchOutcome::Hit
        } else {
            MatchOutcome::Miss
        }
    }
}

/// Per-row cache of coerced field text, keyed by column position
#[derive(Debug, Default)]
pub struct FieldCache {
    coerced: HashMap<usize, Option<String>>,
}

impl FieldCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coerced text of `field`, computed on first use
    pub fn get_or_coerce(&mut self, column: &ColumnDescriptor, field: &FieldValue) -> Option<&str> {
        self.coerced
            .entry(column.index)
            .or_insert_with(|| coerce_field(column, field))
            .as_deref()
    }
}

/// Coerces a field to the text compared by string-valued clauses.
///
/// `None` for Null and for serials outside the renderable calendar.
pub fn coerce_field(column: &ColumnDescriptor, field: &FieldValue) -> Option<String> {
    match field {
        FieldValue::Null => None,
        FieldValue::Text(text) => Some(column.normalize_stored(text)),
        FieldValue::Integer(i) => Some(i.to_string()),
        FieldValue::Decimal(d) if !column.data_type.is_temporal() => Some(d.to_string()),
        FieldValue::Decimal(serial) | FieldValue::Serial(serial) => render_serial(
            *serial,
            column.data_type,
            column.date_display_format.as_deref(),
        ),
        FieldValue::Boolean(b) => Some(b.to_string()),
    }
}

/// Evaluates a clause against one field
pub fn evaluate(
    clause: &Clause,
    column: &ColumnDescriptor,
    field: &FieldValue,
    cache: &mut FieldCache,
) -> MatchOutcome {
    if field.is_null() {
        return MatchOutcome::Miss;
    }

    match (&clause.value, clause.discipline) {
        (_, MatchDiscipline::Off) => MatchOutcome::Miss,
        (ComparisonValue::Boolean(expected), _) => {
            MatchOutcome::from_bool(matches!(field, FieldValue::Boolean(b) if b == expected))
        }
        (ComparisonValue::Integer(i), MatchDiscipline::Exact) => {
            MatchOutcome::from_bool(integer_eq(*i, field))
        }
        (ComparisonValue::Decimal(d), MatchDiscipline::Exact) => {
            MatchOutcome::from_bool(numeric_eq(*d, field))
        }
        (ComparisonValue::Serial(s), MatchDiscipline::Exact) => {
            MatchOutcome::from_bool(serial_eq(*s, field))
        }
        (ComparisonValue::Text(needle), MatchDiscipline::Exact) => {
            let Some(hay) = cache.get_or_coerce(column, field) else {
                return MatchOutcome::Miss;
            };
            if hay == needle.as_str() {
                MatchOutcome::Hit
            } else if clause.allow_incomplete_match && edge_match(hay, needle) {
                MatchOutcome::Incomplete
            } else {
                MatchOutcome::Miss
            }
        }
        (value, discipline) => {
            let needle = comparison_text(value);
            let Some(hay) = cache.get_or_coerce(column, field) else {
                return MatchOutcome::Miss;
            };
            MatchOutcome::from_bool(match discipline {
                MatchDiscipline::StartsWith => hay.starts_with(needle.as_str()),
                MatchDiscipline::Edge => edge_match(hay, &needle),
                _ => hay.contains(needle.as_str()),
            })
        }
    }
}

fn comparison_text(value: &ComparisonValue) -> String {
    match value {
        ComparisonValue::Text(text) => text.clone(),
        ComparisonValue::Integer(i) => i.to_string(),
        ComparisonValue::Decimal(d) | ComparisonValue::Serial(d) => d.to_string(),
        ComparisonValue::Boolean(b) => b.to_string(),
    }
}

/// Integers compare without leaving `i64`; only a Decimal field goes
/// through `f64`
fn integer_eq(expected: i64, field: &FieldValue) -> bool {
    match field {
        FieldValue::Integer(actual) => *actual == expected,
        FieldValue::Decimal(actual) => *actual == expected as f64,
        _ => false,
    }
}

fn numeric_eq(expected: f64, field: &FieldValue) -> bool {
    field.as_number().map_or(false, |actual| actual == expected)
}

fn serial_eq(expected: f64, field: &FieldValue) -> bool {
    match field {
        FieldValue::Serial(actual) | FieldValue::Decimal(actual) => {
            (actual - expected).abs() < SERIAL_EPSILON
        }
        _ => false,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Substring test where the occurrence starts on a word boundary
pub fn edge_match(hay: &str, needle: &str) -> bool {
    let Some(first) = needle.chars().next() else {
        return false;
    };
    let needle_is_word = is_word_char(first);

    let mut prev: Option<char> = None;
    for (at, c) in hay.char_indices() {
        let prev_is_word = prev.map_or(false, is_word_char);
        if prev_is_word != needle_is_word && hay[at..].starts_with(needle) {
            return true;
        }
        prev = Some(c);
    }
    false
}
