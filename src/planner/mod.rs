//! Query Planner subsystem
//!
//! Turns a raw query into a flat, ordered sequence of comparison clauses.
//!
//! # Design Principles
//!
//! - Deterministic: same query and schema, same plan
//! - Non-fatal: unplannable tokens, phrases and pairs are skipped and
//!   recorded as diagnostics, never abort the query
//! - Deduplicated: no two clauses share (column, discipline, type, value)
//!
//! # Clause Order
//!
//! 1. Match discipline rank (exact, starts-with, edge, contains)
//! 2. Number of tokens consumed, widest first
//!
//! The sort is stable, so ties keep synthesis order.

mod clause;
mod coverage;
mod errors;
mod explain;
mod planner;

pub use clause::{Clause, ClauseKey, ComparisonValue};
pub use coverage::Coverage;
pub use errors::{PlannerError, PlannerErrorCode, PlannerResult, Severity};
pub use explain::{ExplainClause, ExplainPlan};
pub use planner::{QueryPlan, QueryPlanner};
