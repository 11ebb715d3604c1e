//! Scan interruption: caller-owned cancellation and deadlines

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::errors::{ExecutorError, ExecutorResult};

/// Shared flag a caller can raise to stop a running scan.
///
/// Clones share the flag. The scanner checks it between row batches.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Everything that can stop a scan early
#[derive(Debug, Clone, Default)]
pub(crate) struct Interrupt {
    pub token: Option<CancellationToken>,
    pub deadline: Option<Instant>,
}

impl Interrupt {
    /// Errors if the scan must stop; `rows_scanned` is for the message
    pub fn check(&self, rows_scanned: usize) -> ExecutorResult<()> {
        if self.token.as_ref().map_or(false, CancellationToken::is_cancelled) {
            return Err(ExecutorError::cancelled(rows_scanned));
        }
        if self.deadline.map_or(false, |deadline| Instant::now() >= deadline) {
            return Err(ExecutorError::deadline_exceeded(rows_scanned));
        }
        Ok(())
    }
}
