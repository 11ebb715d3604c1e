//! Query executor subsystem
//!
//! The executor consumes a plan and produces deterministic results.
//!
//! # Execution Flow
//!
//! 1. Cut the dataset into batches
//! 2. Check for cancellation or an expired deadline before each batch
//! 3. Evaluate each row through its `RowScan` state machine
//! 4. Merge accepted positions, ascending and deduplicated
//!
//! Rows never share mutable state; the schema and the clauses are read-only
//! for the whole scan.

mod cancel;
mod errors;
mod matcher;
mod result;
mod row_scan;
mod scanner;

pub use cancel::CancellationToken;
pub use errors::{ExecutorError, ExecutorErrorCode, ExecutorResult, Severity};
pub use matcher::{coerce_field, edge_match, evaluate, FieldCache, MatchOutcome};
pub use result::{QueryResult, ResultRow};
pub use row_scan::{RowScan, RowState, ScanContext};
pub use scanner::{
    RowScanner, ScanOptions, ScanOutcome, DEFAULT_BATCH_SIZE, DEFAULT_PARALLEL_THRESHOLD,
};
