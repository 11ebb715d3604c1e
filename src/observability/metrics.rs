//! Search metrics
//!
//! - Counters only (no gauges, no histograms)
//! - Monotonic increase
//! - Thread-safe but lock-minimal

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for one search engine.
///
/// All counters use Relaxed atomics; a snapshot is not a consistent cut
/// across counters.
#[derive(Debug, Default)]
pub struct SearchMetrics {
    /// Queries that reached the planner
    queries_executed: AtomicU64,
    /// Queries the coverage gate stopped before scanning
    scans_skipped: AtomicU64,
    /// Scans aborted by cancellation or deadline
    scans_cancelled: AtomicU64,
    /// Rows evaluated across all scans
    rows_scanned: AtomicU64,
    /// Rows accepted across all scans
    rows_matched: AtomicU64,
    /// Clauses in all plans built
    clauses_planned: AtomicU64,
    /// Planner diagnostics recorded
    clauses_dropped: AtomicU64,
}

impl SearchMetrics {
    /// Create a new registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_queries_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_scans_skipped(&self) {
        self.scans_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_scans_cancelled(&self) {
        self.scans_cancelled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_rows_scanned(&self, rows: u64) {
        self.rows_scanned.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn add_rows_matched(&self, rows: u64) {
        self.rows_matched.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn add_clauses_planned(&self, clauses: u64) {
        self.clauses_planned.fetch_add(clauses, Ordering::Relaxed);
    }

    pub fn add_clauses_dropped(&self, clauses: u64) {
        self.clauses_dropped.fetch_add(clauses, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            scans_skipped: self.scans_skipped.load(Ordering::Relaxed),
            scans_cancelled: self.scans_cancelled.load(Ordering::Relaxed),
            rows_scanned: self.rows_scanned.load(Ordering::Relaxed),
            rows_matched: self.rows_matched.load(Ordering::Relaxed),
            clauses_planned: self.clauses_planned.load(Ordering::Relaxed),
            clauses_dropped: self.clauses_dropped.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub scans_skipped: u64,
    pub scans_cancelled: u64,
    pub rows_scanned: u64,
    pub rows_matched: u64,
    pub clauses_planned: u64,
    pub clauses_dropped: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let snapshot = SearchMetrics::new().snapshot();
        assert_eq!(snapshot.queries_executed, 0);
        assert_eq!(snapshot.rows_scanned, 0);
        assert_eq!(snapshot.clauses_dropped, 0);
    }

    #[test]
    fn test_increment_counters() {
        let metrics = SearchMetrics::new();
        metrics.increment_queries_executed();
        metrics.increment_queries_executed();
        metrics.increment_scans_skipped();
        metrics.increment_scans_cancelled();
        metrics.add_rows_scanned(100);
        metrics.add_rows_matched(3);
        metrics.add_clauses_planned(7);
        metrics.add_clauses_dropped(2);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.queries_executed, 2);
        assert_eq!(snapshot.scans_skipped, 1);
        assert_eq!(snapshot.scans_cancelled, 1);
        assert_eq!(snapshot.rows_scanned, 100);
        assert_eq!(snapshot.rows_matched, 3);
        assert_eq!(snapshot.clauses_planned, 7);
        assert_eq!(snapshot.clauses_dropped, 2);
    }

    #[test]
    fn test_snapshot_serializes() {
        let metrics = SearchMetrics::new();
        metrics.add_rows_scanned(1234);
        let json = serde_json::to_value(metrics.snapshot()).unwrap();
        assert_eq!(json["rows_scanned"], 1234);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let metrics = Arc::new(SearchMetrics::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let m = Arc::clone(&metrics);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    m.increment_queries_executed();
                    m.add_rows_scanned(2);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.queries_executed, 1000);
        assert_eq!(snapshot.rows_scanned, 2000);
    }
}
