//! Batched row scan
//!
//! The dataset is cut into fixed-size batches. Large datasets evaluate
//! batches on the rayon pool; small ones run the same batches in order.
//! Interrupts are checked before each batch. Matched positions are merged,
//! sorted and deduplicated, so evaluation order never shows in the output.

use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::dataset::{Dataset, Row};

use super::cancel::{CancellationToken, Interrupt};
use super::errors::ExecutorResult;
use super::row_scan::{RowScan, RowState, ScanContext};

pub const DEFAULT_BATCH_SIZE: usize = 4096;
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 50_000;

/// Tuning for one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub batch_size: usize,
    /// Row count at which batches go to the thread pool
    pub parallel_threshold: usize,
    /// Wall-clock budget measured from the start of the scan
    pub deadline: Option<Duration>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            deadline: None,
        }
    }
}

/// Accepted positions and how many rows were evaluated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Ascending, no duplicates
    pub matched: Vec<usize>,
    pub scanned_rows: usize,
}

/// Runs a plan's clauses over every row of a dataset
#[derive(Debug, Clone, Default)]
pub struct RowScanner {
    options: ScanOptions,
}

impl RowScanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scans `dataset`, stopping early if `token` is cancelled or the
    /// deadline passes.
    pub fn scan(
        &self,
        ctx: &ScanContext<'_>,
        dataset: &Dataset,
        token: Option<&CancellationToken>,
    ) -> ExecutorResult<ScanOutcome> {
        let interrupt = Interrupt {
            token: token.cloned(),
            deadline: self.options.deadline.map(|budget| Instant::now() + budget),
        };
        let batch_size = self.options.batch_size.max(1);
        let rows = dataset.rows();

        let batches: Vec<Vec<usize>> = if rows.len() >= self.options.parallel_threshold {
            rows.par_chunks(batch_size)
                .enumerate()
                .map(|(batch, chunk)| scan_batch(ctx, &interrupt, batch * batch_size, chunk))
                .collect::<ExecutorResult<_>>()?
        } else {
            rows.chunks(batch_size)
                .enumerate()
                .map(|(batch, chunk)| scan_batch(ctx, &interrupt, batch * batch_size, chunk))
                .collect::<ExecutorResult<_>>()?
        };

        let mut matched: Vec<usize> = batches.into_iter().flatten().collect();
        matched.sort_unstable();
        matched.dedup();

        Ok(ScanOutcome {
            matched,
            scanned_rows: rows.len(),
        })
    }
}

fn scan_batch(
    ctx: &ScanContext<'_>,
    interrupt: &Interrupt,
    offset: usize,
    chunk: &[Row],
) -> ExecutorResult<Vec<usize>> {
    interrupt.check(offset)?;

    let mut matched = Vec::new();
    for (i, row) in chunk.iter().enumerate() {
        let position = offset + i;
        if RowScan::new(ctx).run(position, row)? == RowState::Accepted {
            matched.push(position);
        }
    }
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::dataset::FieldValue;
    use crate::executor::ExecutorErrorCode;
    use crate::planner::{Clause, ComparisonValue};
    use crate::schema::{ColumnDescriptor, DataType, MatchDiscipline, Schema};

    fn schema() -> Schema {
        Schema::from_columns(vec![ColumnDescriptor::new(
            "code",
            DataType::String,
            MatchDiscipline::Edge,
        )])
        .unwrap()
    }

    fn clauses() -> Vec<Clause> {
        vec![Clause {
            column: 0,
            field: "code".into(),
            discipline: MatchDiscipline::Edge,
            data_type: DataType::String,
            value: ComparisonValue::Text("hd".into()),
            tokens: BTreeSet::from(["hd".to_string()]),
            allow_incomplete_match: false,
        }]
    }

    fn dataset(n: usize) -> Dataset {
        (0..n)
            .map(|i| {
                let code = if i % 3 == 0 { "HDBUY" } else { "SDRENT" };
                Row::new(vec![FieldValue::from(code)])
            })
            .collect()
    }

    fn expected(n: usize) -> Vec<usize> {
        (0..n).filter(|i| i % 3 == 0).collect()
    }

    #[test]
    fn test_sequential_scan() {
        let schema = schema();
        let clauses = clauses();
        let ctx = ScanContext::new(&schema, &clauses, 1, "hd");
        let scanner = RowScanner::new(ScanOptions {
            batch_size: 4,
            parallel_threshold: usize::MAX,
            deadline: None,
        });
        let outcome = scanner.scan(&ctx, &dataset(10), None).unwrap();
        assert_eq!(outcome.matched, expected(10));
        assert_eq!(outcome.scanned_rows, 10);
    }

    #[test]
    fn test_parallel_scan_matches_sequential() {
        let schema = schema();
        let clauses = clauses();
        let ctx = ScanContext::new(&schema, &clauses, 1, "hd");
        let data = dataset(1000);

        let parallel = RowScanner::new(ScanOptions {
            batch_size: 7,
            parallel_threshold: 1,
            deadline: None,
        })
        .scan(&ctx, &data, None)
        .unwrap();
        let sequential = RowScanner::default().scan(&ctx, &data, None).unwrap();

        assert_eq!(parallel, sequential);
        assert_eq!(parallel.matched, expected(1000));
    }

    #[test]
    fn test_cancelled_scan() {
        let schema = schema();
        let clauses = clauses();
        let ctx = ScanContext::new(&schema, &clauses, 1, "hd");
        let token = CancellationToken::new();
        token.cancel();

        let err = RowScanner::default()
            .scan(&ctx, &dataset(10), Some(&token))
            .unwrap_err();
        assert_eq!(err.code(), ExecutorErrorCode::SearchScanCancelled);
    }

    #[test]
    fn test_zero_deadline_expires() {
        let schema = schema();
        let clauses = clauses();
        let ctx = ScanContext::new(&schema, &clauses, 1, "hd");
        let scanner = RowScanner::new(ScanOptions {
            deadline: Some(Duration::ZERO),
            ..ScanOptions::default()
        });
        let err = scanner.scan(&ctx, &dataset(10), None).unwrap_err();
        assert_eq!(err.code(), ExecutorErrorCode::SearchDeadlineExceeded);
    }

    #[test]
    fn test_empty_dataset() {
        let schema = schema();
        let clauses = clauses();
        let ctx = ScanContext::new(&schema, &clauses, 1, "hd");
        let outcome = RowScanner::default().scan(&ctx, &Dataset::default(), None).unwrap();
        assert!(outcome.matched.is_empty());
        assert_eq!(outcome.scanned_rows, 0);
    }
}
