//! Coverage gate
//!
//! A row can only be a full match if every query token is consumed by at
//! least one clause. Tokens no clause consumes make the scan pointless.

use std::collections::HashSet;

use super::planner::QueryPlan;

/// Tokens of a plan that no clause consumes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coverage {
    uncovered: Vec<String>,
}

impl Coverage {
    /// Computes the uncovered tokens of `plan`, in first-occurrence order
    pub fn check(plan: &QueryPlan) -> Self {
        let covered: HashSet<&str> = plan
            .clauses
            .iter()
            .flat_map(|clause| clause.tokens.iter().map(String::as_str))
            .collect();

        let uncovered = plan
            .tokens
            .iter()
            .filter(|token| !covered.contains(token.as_str()))
            .cloned()
            .collect();

        Self { uncovered }
    }

    /// Every token is consumed by some clause
    pub fn is_complete(&self) -> bool {
        self.uncovered.is_empty()
    }

    pub fn uncovered(&self) -> &[String] {
        &self.uncovered
    }

    pub fn into_uncovered(self) -> Vec<String> {
        self.uncovered
    }
}
