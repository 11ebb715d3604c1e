//! Per-row evaluation state machine
//!
//! ```text
//! NoMatch -> Accumulating -> FullMatch -> Accepted
//!                                |
//!                                +-> Verifying -> Accepted | Rejected
//! ```
//!
//! A row whose clauses run out before FullMatch is Rejected.

use std::collections::HashSet;

use crate::dataset::{FieldValue, Row};
use crate::planner::Clause;
use crate::schema::Schema;

use super::errors::{ExecutorError, ExecutorResult};
use super::matcher::{evaluate, FieldCache, MatchOutcome};

/// States of a row under evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    NoMatch,
    Accumulating,
    FullMatch,
    Verifying,
    Accepted,
    Rejected,
}

/// Read-only inputs shared by every row of one scan
#[derive(Debug)]
pub struct ScanContext<'a> {
    pub schema: &'a Schema,
    /// Plan clauses in priority order
    pub clauses: &'a [Clause],
    /// Number of distinct query tokens
    pub required_tokens: usize,
    /// The whole raw query, lowercased
    pub query_lower: String,
}

impl<'a> ScanContext<'a> {
    pub fn new(schema: &'a Schema, clauses: &'a [Clause], required_tokens: usize, query: &str) -> Self {
        Self {
            schema,
            clauses,
            required_tokens,
            query_lower: query.to_lowercase(),
        }
    }
}

/// Bookkeeping for one row
pub struct RowScan<'c> {
    ctx: &'c ScanContext<'c>,
    state: RowState,
    matched: HashSet<&'c str>,
    claimed: HashSet<usize>,
    cache: FieldCache,
    pending: Vec<usize>,
}

impl<'c> RowScan<'c> {
    pub fn new(ctx: &'c ScanContext<'c>) -> Self {
        Self {
            ctx,
            state: RowState::NoMatch,
            matched: HashSet::new(),
            claimed: HashSet::new(),
            cache: FieldCache::new(),
            pending: Vec::new(),
        }
    }

    pub fn state(&self) -> RowState {
        self.state
    }

    /// Runs the row to a terminal state. `position` is only for errors.
    pub fn run(mut self, position: usize, row: &Row) -> ExecutorResult<RowState> {
        if self.ctx.required_tokens == 0 {
            return Ok(RowState::Rejected);
        }

        for clause in self.ctx.clauses {
            if self.claimed.contains(&clause.column) {
                continue;
            }

            let column = self
                .ctx
                .schema
                .column(clause.column)
                .ok_or_else(|| ExecutorError::unknown_column(&clause.field, clause.column))?;
            let field = row
                .get(clause.column)
                .ok_or_else(|| ExecutorError::missing_field(position, &clause.field, clause.column))?;

            let outcome = evaluate(clause, column, field, &mut self.cache);
            if !outcome.is_match() {
                continue;
            }

            self.state = RowState::Accumulating;
            if outcome == MatchOutcome::Incomplete && !self.pending.contains(&clause.column) {
                self.pending.push(clause.column);
            }
            self.matched.extend(clause.tokens.iter().map(String::as_str));

            if self.matched.len() >= self.ctx.required_tokens {
                self.state = RowState::FullMatch;
                break;
            }
            if !column.is_multi_word_capable() {
                self.claimed.insert(clause.column);
            }
        }

        Ok(self.finish(row))
    }

    fn finish(&mut self, row: &Row) -> RowState {
        if self.state != RowState::FullMatch {
            self.state = RowState::Rejected;
            return self.state;
        }
        if self.pending.is_empty() {
            self.state = RowState::Accepted;
            return self.state;
        }

        self.state = RowState::Verifying;
        let verified = self.pending.iter().all(|&position| {
            row.get(position)
                .and_then(raw_text)
                .map_or(false, |raw| self.ctx.query_lower.contains(&raw.to_lowercase()))
        });
        self.state = if verified {
            RowState::Accepted
        } else {
            RowState::Rejected
        };
        self.state
    }
}

fn raw_text(field: &FieldValue) -> Option<&str> {
    match field {
        FieldValue::Text(text) => Some(text.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::planner::ComparisonValue;
    use crate::schema::{ColumnDescriptor, DataType, MatchDiscipline, TriState};

    fn schema() -> Schema {
        Schema::from_columns(vec![
            ColumnDescriptor::new("state", DataType::String, MatchDiscipline::Edge)
                .with_multiple_words(TriState::No),
            ColumnDescriptor::new("code", DataType::String, MatchDiscipline::Edge)
                .with_multiple_words(TriState::No),
            ColumnDescriptor::new("city", DataType::String, MatchDiscipline::Exact),
        ])
        .unwrap()
    }

    fn clause(schema: &Schema, column: usize, value: &str, tokens: &[&str]) -> Clause {
        let col = schema.column(column).unwrap();
        Clause {
            column,
            field: col.name.clone(),
            discipline: col.match_discipline,
            data_type: col.data_type,
            value: ComparisonValue::Text(value.to_string()),
            tokens: tokens.iter().map(|t| t.to_string()).collect::<BTreeSet<_>>(),
            allow_incomplete_match: col.match_discipline == MatchDiscipline::Exact,
        }
    }

    fn row(values: &[&str]) -> Row {
        Row::new(values.iter().map(|v| FieldValue::from(*v)).collect())
    }

    #[test]
    fn test_all_tokens_required() {
        let schema = schema();
        let clauses = vec![
            clause(&schema, 0, "ne", &["ne"]),
            clause(&schema, 1, "ne", &["ne"]),
            clause(&schema, 0, "hdbuy", &["hdbuy"]),
            clause(&schema, 1, "hdbuy", &["hdbuy"]),
        ];
        let ctx = ScanContext::new(&schema, &clauses, 2, "ne hdbuy");

        let hit = row(&["NE", "HDBUY", "Omaha"]);
        assert_eq!(RowScan::new(&ctx).run(0, &hit).unwrap(), RowState::Accepted);

        let partial = row(&["NE", "SDRENT", "Omaha"]);
        assert_eq!(RowScan::new(&ctx).run(1, &partial).unwrap(), RowState::Rejected);
    }

    #[test]
    fn test_claimed_column_not_reused() {
        let schema = schema();
        // "ne" and "nebraska" would both match the state column; once it
        // is claimed by "ne" the second token needs another column
        let clauses = vec![
            clause(&schema, 0, "ne", &["ne"]),
            clause(&schema, 0, "nebraska", &["nebraska"]),
        ];
        let ctx = ScanContext::new(&schema, &clauses, 2, "ne nebraska");
        let r = row(&["NE NEBRASKA", "X", "Y"]);
        assert_eq!(RowScan::new(&ctx).run(0, &r).unwrap(), RowState::Rejected);
    }

    #[test]
    fn test_incomplete_match_verified() {
        let schema = schema();
        let clauses = vec![clause(&schema, 2, "new", &["new"])];
        let ctx = ScanContext::new(&schema, &clauses, 1, "new");
        let r = row(&["NE", "HDBUY", "New York"]);
        assert_eq!(RowScan::new(&ctx).run(0, &r).unwrap(), RowState::Rejected);

        let clauses = vec![
            clause(&schema, 2, "new", &["new"]),
            clause(&schema, 2, "york", &["york"]),
        ];
        let ctx = ScanContext::new(&schema, &clauses, 2, "New York");
        assert_eq!(RowScan::new(&ctx).run(0, &r).unwrap(), RowState::Accepted);
    }

    #[test]
    fn test_missing_field_is_error() {
        let schema = schema();
        let clauses = vec![clause(&schema, 2, "x", &["x"])];
        let ctx = ScanContext::new(&schema, &clauses, 1, "x");
        let short = Row::new(vec![FieldValue::from("a")]);
        let err = RowScan::new(&ctx).run(7, &short).unwrap_err();
        assert_eq!(err.row(), Some(7));
    }

    #[test]
    fn test_no_tokens_rejects() {
        let schema = schema();
        let ctx = ScanContext::new(&schema, &[], 0, "");
        let r = row(&["NE", "HDBUY", "Omaha"]);
        assert_eq!(RowScan::new(&ctx).run(0, &r).unwrap(), RowState::Rejected);
    }

    #[test]
    fn test_initial_state() {
        let schema = schema();
        let ctx = ScanContext::new(&schema, &[], 1, "x");
        assert_eq!(RowScan::new(&ctx).state(), RowState::NoMatch);
    }
}
