//! Explain plan output
//!
//! Produces deterministic, human-readable explain output without scanning.

use std::fmt;

use serde::Serialize;

use super::clause::{Clause, ComparisonValue};
use super::coverage::Coverage;
use super::planner::QueryPlan;

/// One clause as shown by explain
#[derive(Debug, Clone, Serialize)]
pub struct ExplainClause {
    pub field: String,
    pub discipline: String,
    pub data_type: String,
    pub value: ComparisonValue,
    pub tokens: Vec<String>,
    pub allow_incomplete_match: bool,
}

impl From<&Clause> for ExplainClause {
    fn from(clause: &Clause) -> Self {
        Self {
            field: clause.field.clone(),
            discipline: clause.discipline.as_str().to_string(),
            data_type: clause.data_type.type_name().to_string(),
            value: clause.value.clone(),
            tokens: clause.tokens.iter().cloned().collect(),
            allow_incomplete_match: clause.allow_incomplete_match,
        }
    }
}

/// Explain plan output
#[derive(Debug, Clone, Serialize)]
pub struct ExplainPlan {
    /// Raw query as received
    pub query: String,
    pub tokens: Vec<String>,
    /// Clauses in evaluation order
    pub clauses: Vec<ExplainClause>,
    pub uncovered_tokens: Vec<String>,
    /// Whether a scan would run
    pub scan_required: bool,
    /// Rendered planner diagnostics
    pub diagnostics: Vec<String>,
}

impl ExplainPlan {
    /// Creates an explain plan from a query plan
    pub fn from_plan(query: &str, plan: &QueryPlan) -> Self {
        let coverage = Coverage::check(plan);
        Self {
            query: query.to_string(),
            tokens: plan.tokens.clone(),
            clauses: plan.clauses.iter().map(ExplainClause::from).collect(),
            scan_required: !plan.is_empty() && coverage.is_complete(),
            uncovered_tokens: coverage.into_uncovered(),
            diagnostics: plan.diagnostics.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN PLAN ===")?;
        writeln!(f, "Query: {:?}", self.query)?;
        writeln!(f, "Tokens: [{}]", self.tokens.join(", "))?;

        if self.scan_required {
            writeln!(f, "Status: SCAN")?;
        } else {
            writeln!(f, "Status: SKIPPED")?;
        }

        if !self.clauses.is_empty() {
            writeln!(f, "Clauses:")?;
            for (position, clause) in self.clauses.iter().enumerate() {
                write!(
                    f,
                    "  {}. {} {} {} {} <- [{}]",
                    position + 1,
                    clause.field,
                    clause.discipline,
                    clause.data_type,
                    clause.value,
                    clause.tokens.join(", ")
                )?;
                if clause.allow_incomplete_match {
                    write!(f, " (incomplete match allowed)")?;
                }
                writeln!(f)?;
            }
        }

        if !self.uncovered_tokens.is_empty() {
            writeln!(f, "Uncovered: [{}]", self.uncovered_tokens.join(", "))?;
        }

        if !self.diagnostics.is_empty() {
            writeln!(f, "Diagnostics:")?;
            for diagnostic in &self.diagnostics {
                writeln!(f, "  - {}", diagnostic)?;
            }
        }

        Ok(())
    }
}
