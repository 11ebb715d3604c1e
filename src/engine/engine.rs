//! Search engine: plan, gate on coverage, scan
//!
//! The engine borrows a schema and a dataset and owns its configuration,
//! compiled temporal patterns and metrics. Planning is sequential; only the
//! row scan may fan out to the thread pool.

use crate::config::SearchConfig;
use crate::dataset::Dataset;
use crate::datetime::TemporalPatterns;
use crate::executor::{CancellationToken, QueryResult, RowScanner, ScanContext};
use crate::observability::{log_event_with_fields, Event, MetricsSnapshot, SearchMetrics};
use crate::planner::{Coverage, ExplainPlan, QueryPlan, QueryPlanner};
use crate::schema::Schema;

use super::errors::{EngineError, EngineResult};

/// Free-text search over one dataset
pub struct SearchEngine<'a> {
    schema: &'a Schema,
    dataset: &'a Dataset,
    config: SearchConfig,
    patterns: TemporalPatterns,
    metrics: SearchMetrics,
}

impl<'a> SearchEngine<'a> {
    /// Creates an engine. Fails if `config` does not validate.
    pub fn new(schema: &'a Schema, dataset: &'a Dataset, config: SearchConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            schema,
            dataset,
            config,
            patterns: TemporalPatterns::new()?,
            metrics: SearchMetrics::new(),
        })
    }

    pub fn schema(&self) -> &Schema {
        self.schema
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Point-in-time copy of the engine's counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Runs a query to completion
    pub fn query(&self, raw: &str) -> EngineResult<QueryResult> {
        self.run(raw, None)
    }

    /// Runs a query that stops early once `token` is cancelled
    pub fn query_with_cancel(&self, raw: &str, token: &CancellationToken) -> EngineResult<QueryResult> {
        self.run(raw, Some(token))
    }

    /// Plans a query and describes it without scanning
    pub fn explain(&self, raw: &str) -> EngineResult<ExplainPlan> {
        let plan = self.plan(raw)?;
        Ok(ExplainPlan::from_plan(raw, &plan))
    }

    /// Builds and checks the plan for `raw`
    pub fn plan(&self, raw: &str) -> EngineResult<QueryPlan> {
        let length = raw.chars().count().to_string();
        log_event_with_fields(Event::QueryReceived, &[("length", length.as_str())]);

        let planner = QueryPlanner::new(self.schema, &self.patterns, self.config.tokenizer());
        let plan = planner.plan(raw);
        plan.validate(self.schema)?;

        for diagnostic in &plan.diagnostics {
            let code = diagnostic.code().code();
            let column = diagnostic.column().unwrap_or("-");
            log_event_with_fields(
                Event::ClauseDropped,
                &[
                    ("code", code),
                    ("column", column),
                    ("reason", diagnostic.message()),
                ],
            );
        }

        self.metrics.add_clauses_planned(plan.clauses.len() as u64);
        self.metrics.add_clauses_dropped(plan.diagnostics.len() as u64);

        let tokens = plan.tokens.len().to_string();
        let clauses = plan.clauses.len().to_string();
        let dropped = plan.diagnostics.len().to_string();
        log_event_with_fields(
            Event::QueryPlanned,
            &[
                ("clauses", clauses.as_str()),
                ("dropped", dropped.as_str()),
                ("tokens", tokens.as_str()),
            ],
        );

        Ok(plan)
    }

    fn run(&self, raw: &str, token: Option<&CancellationToken>) -> EngineResult<QueryResult> {
        self.metrics.increment_queries_executed();
        let plan = self.plan(raw)?;

        if plan.is_empty() {
            return Ok(self.skip(raw, plan.tokens, Vec::new(), "no_tokens"));
        }

        let coverage = Coverage::check(&plan);
        if !coverage.is_complete() {
            return Ok(self.skip(raw, plan.tokens, coverage.into_uncovered(), "uncovered_tokens"));
        }

        let ctx = ScanContext::new(self.schema, &plan.clauses, plan.tokens.len(), raw);
        let scanner = RowScanner::new(self.config.scan_options());
        let outcome = match scanner.scan(&ctx, self.dataset, token) {
            Ok(outcome) => outcome,
            Err(err) => {
                if err.is_interrupt() {
                    self.metrics.increment_scans_cancelled();
                    let code = err.code().code();
                    log_event_with_fields(
                        Event::ScanCancelled,
                        &[("code", code), ("reason", err.message())],
                    );
                }
                return Err(EngineError::Executor(err));
            }
        };

        self.metrics.add_rows_scanned(outcome.scanned_rows as u64);
        self.metrics.add_rows_matched(outcome.matched.len() as u64);

        let matched = outcome.matched.len().to_string();
        let scanned = outcome.scanned_rows.to_string();
        log_event_with_fields(
            Event::ScanComplete,
            &[("matched", matched.as_str()), ("scanned", scanned.as_str())],
        );

        Ok(QueryResult::scanned(
            raw,
            plan.tokens,
            outcome.matched,
            outcome.scanned_rows,
            self.dataset,
            self.config.preview_limit,
        ))
    }

    fn skip(&self, raw: &str, tokens: Vec<String>, uncovered: Vec<String>, reason: &str) -> QueryResult {
        self.metrics.increment_scans_skipped();
        let uncovered_text = uncovered.join(" ");
        log_event_with_fields(
            Event::ScanSkipped,
            &[("reason", reason), ("uncovered", uncovered_text.as_str())],
        );
        QueryResult::skipped(raw, tokens, uncovered)
    }
}
