//! Query planner
//!
//! Produces a deterministic, ordered clause plan from a raw query.
//!
//! Planning runs in two phases:
//! 1. Phrase clauses for exact columns whose values span several words:
//!    multi-word strings take the whole query, temporal columns take every
//!    date/time phrase their patterns find.
//! 2. Single-token clauses for every (token, column) pair that passes the
//!    column's eligibility filters, coerced to the column's comparison form.
//!
//! The plan is then stably sorted by match discipline rank, widest clause
//! first within a rank.

use std::collections::{BTreeSet, HashMap};

use crate::datetime::{parse_serial, TemporalPatterns};
use crate::schema::{ColumnDescriptor, DataType, MatchDiscipline, Schema, TriState};
use crate::tokenizer::{
    boolean_literal, is_date_fragment, is_numeric_with_separators, TokenClass, Tokenizer,
};

use super::clause::{Clause, ClauseKey, ComparisonValue};
use super::errors::{PlannerError, PlannerResult};

/// Immutable query plan (no runtime state)
#[derive(Debug, Clone, Default)]
pub struct QueryPlan {
    /// Distinct query tokens in first-occurrence order
    pub tokens: Vec<String>,
    /// Clauses in evaluation order
    pub clauses: Vec<Clause>,
    /// Non-fatal problems met while planning
    pub diagnostics: Vec<PlannerError>,
}

impl QueryPlan {
    /// Returns true when the query produced no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Checks every clause against `schema`.
    ///
    /// A plan built by one schema and run against another fails here
    /// instead of reading the wrong row positions.
    pub fn validate(&self, schema: &Schema) -> PlannerResult<()> {
        for clause in &self.clauses {
            match schema.column(clause.column) {
                Some(column) if column.name == clause.field => {}
                _ => return Err(PlannerError::schema_reference(&clause.field, clause.column)),
            }
        }
        Ok(())
    }
}

/// Insertion-ordered clause list with key-based deduplication.
///
/// A clause whose key is already present is not added; its tokens are
/// merged into the existing clause instead, so "5" and "5.0" share one
/// comparison and both stay covered.
#[derive(Default)]
struct ClauseSet {
    positions: HashMap<ClauseKey, usize>,
    clauses: Vec<Clause>,
}

impl ClauseSet {
    fn insert(&mut self, clause: Clause) -> bool {
        match self.positions.get(&clause.key()) {
            Some(&at) => {
                self.clauses[at].tokens.extend(clause.tokens);
                false
            }
            None => {
                self.positions.insert(clause.key(), self.clauses.len());
                self.clauses.push(clause);
                true
            }
        }
    }

    fn into_ordered(self) -> Vec<Clause> {
        let mut clauses = self.clauses;
        clauses.sort_by(|a, b| {
            a.discipline
                .rank()
                .cmp(&b.discipline.rank())
                .then_with(|| b.width().cmp(&a.width()))
        });
        clauses
    }
}

/// Query planner that produces deterministic plans
pub struct QueryPlanner<'a> {
    schema: &'a Schema,
    patterns: &'a TemporalPatterns,
    tokenizer: Tokenizer,
}

impl<'a> QueryPlanner<'a> {
    /// Creates a new planner
    pub fn new(schema: &'a Schema, patterns: &'a TemporalPatterns, tokenizer: Tokenizer) -> Self {
        Self {
            schema,
            patterns,
            tokenizer,
        }
    }

    /// Plans a raw query.
    ///
    /// Never fails: anything that cannot be planned is left out and
    /// recorded in `diagnostics`. Same inputs always give the same plan.
    pub fn plan(&self, raw: &str) -> QueryPlan {
        let mut diagnostics = Vec::new();

        let tokens: Vec<String> = self
            .tokenizer
            .tokenize(raw)
            .into_iter()
            .filter(|token| {
                let ok = self.tokenizer.is_well_formed(token);
                if !ok {
                    diagnostics.push(PlannerError::malformed_token(token));
                }
                ok
            })
            .collect();

        if tokens.is_empty() {
            return QueryPlan {
                tokens,
                clauses: Vec::new(),
                diagnostics,
            };
        }

        let mut clauses = ClauseSet::default();
        self.plan_phrases(&tokens, &mut clauses, &mut diagnostics);
        self.plan_single_tokens(&tokens, &mut clauses, &mut diagnostics);

        QueryPlan {
            tokens,
            clauses: clauses.into_ordered(),
            diagnostics,
        }
    }

    fn plan_phrases(
        &self,
        tokens: &[String],
        clauses: &mut ClauseSet,
        diagnostics: &mut Vec<PlannerError>,
    ) {
        let joined = tokens.join(" ");

        for column in self.schema.columns() {
            if column.match_discipline != MatchDiscipline::Exact {
                continue;
            }

            if column.data_type == DataType::String
                && column.contains_multiple_words == TriState::Yes
            {
                clauses.insert(clause_for(
                    column,
                    ComparisonValue::Text(column.apply_case(&joined)),
                    tokens.iter().cloned().collect(),
                ));
            } else if column.data_type.is_temporal() {
                for phrase in self.patterns.find_all(column.data_type, &joined) {
                    match parse_serial(phrase, column.data_type) {
                        Some(serial) => {
                            clauses.insert(clause_for(
                                column,
                                ComparisonValue::Serial(serial),
                                phrase.split_whitespace().map(str::to_string).collect(),
                            ));
                        }
                        None => {
                            diagnostics.push(PlannerError::unparseable_date(&column.name, phrase));
                        }
                    }
                }
            }
        }
    }

    fn plan_single_tokens(
        &self,
        tokens: &[String],
        clauses: &mut ClauseSet,
        diagnostics: &mut Vec<PlannerError>,
    ) {
        for token in tokens {
            let class = TokenClass::classify(token);

            for column in self.schema.columns() {
                if !self.is_eligible(token, &class, column) {
                    continue;
                }

                match coerce(token, &class, column) {
                    Ok(value) => {
                        let mut clause = clause_for(column, value, BTreeSet::from([token.clone()]));
                        clause.allow_incomplete_match = column.match_discipline
                            == MatchDiscipline::Exact
                            && column.data_type == DataType::String
                            && column.contains_multiple_words == TriState::Unknown;
                        clauses.insert(clause);
                    }
                    Err(err) => diagnostics.push(err),
                }
            }
        }
    }

    /// Eligibility filters, applied in order. Any failure skips the column
    /// for this token.
    fn is_eligible(&self, token: &str, class: &TokenClass, column: &ColumnDescriptor) -> bool {
        if column.match_discipline == MatchDiscipline::Off {
            return false;
        }
        if column.handled_by_phrase_clause() {
            return false;
        }

        match column.data_type {
            DataType::Integer | DataType::Decimal => {
                let Some(number) = class.number() else {
                    return false;
                };
                if column.max_value.map_or(false, |max| number > max)
                    || column.min_value.map_or(false, |min| number < min)
                {
                    return false;
                }
                !(column.data_type == DataType::Integer && class.is_decimal_valued())
            }
            DataType::Boolean => boolean_literal(token).is_some(),
            DataType::Time => self.patterns.is_time_token(token),
            // words pass for rendered month, weekday and meridiem names
            DataType::Date | DataType::DateTime => {
                !is_numeric_with_separators(token) || is_date_fragment(token)
            }
            DataType::String => {
                if column.match_discipline == MatchDiscipline::Contains {
                    return true;
                }
                let numeric_start = token.chars().next().map_or(false, |c| c.is_ascii_digit());
                if numeric_start && column.contains_numeric_start == TriState::No {
                    return false;
                }
                let length = token.chars().count();
                !(column.max_length.map_or(false, |max| length > max)
                    || column.min_length.map_or(false, |min| length < min))
            }
        }
    }
}

fn clause_for(column: &ColumnDescriptor, value: ComparisonValue, tokens: BTreeSet<String>) -> Clause {
    Clause {
        column: column.index,
        field: column.name.clone(),
        discipline: column.match_discipline,
        data_type: column.data_type,
        value,
        tokens,
        allow_incomplete_match: false,
    }
}

/// Coerces a token into the comparison form of `column`
fn coerce(token: &str, class: &TokenClass, column: &ColumnDescriptor) -> PlannerResult<ComparisonValue> {
    match column.data_type {
        DataType::String => Ok(ComparisonValue::Text(column.apply_case(token))),
        DataType::Integer | DataType::Decimal
            if column.match_discipline == MatchDiscipline::Exact =>
        {
            let number = class
                .number()
                .ok_or_else(|| PlannerError::type_coercion(&column.name, token, "not a number"))?;
            if class.is_integer_valued() {
                integer_value(token, number)
                    .map(ComparisonValue::Integer)
                    .ok_or_else(|| {
                        PlannerError::type_coercion(&column.name, token, "outside the 64-bit integer range")
                    })
            } else {
                Ok(ComparisonValue::Decimal(number))
            }
        }
        DataType::Integer | DataType::Decimal | DataType::Date | DataType::DateTime | DataType::Time => {
            Ok(ComparisonValue::Text(token.to_string()))
        }
        DataType::Boolean => boolean_literal(token)
            .map(ComparisonValue::Boolean)
            .ok_or_else(|| PlannerError::type_coercion(&column.name, token, "not a boolean literal")),
    }
}

/// Integer value of an integer-valued token, if it fits in an i64
fn integer_value(token: &str, number: f64) -> Option<i64> {
    if let Ok(value) = token.parse::<i64>() {
        return Some(value);
    }
    // 2^63 is exactly representable, so the upper bound is exclusive
    if number >= i64::MIN as f64 && number < i64::MAX as f64 {
        Some(number as i64)
    } else {
        None
    }
}
