//! Observability subsystem
//!
//! This module provides:
//! - Typed lifecycle events with deterministic fields
//! - Search metrics (atomic counters)
//! - Subscriber setup for the binary
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on query results
//! 3. The library never installs a subscriber
//!
//! # Usage
//!
//! ```ignore
//! use tabsearch::observability::{log_event_with_fields, Event, SearchMetrics};
//!
//! log_event_with_fields(Event::ScanComplete, &[("matches", "3")]);
//!
//! let metrics = SearchMetrics::new();
//! metrics.increment_queries_executed();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{render_fields, Logger, Severity};
pub use metrics::{MetricsSnapshot, SearchMetrics};

use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor a level is given
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Observability setup errors
#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },
    #[error("logging already initialized")]
    AlreadyInitialized,
}

/// Installs the global `tracing` subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `level`; with neither, `info` is used.
pub fn init_logging(level: Option<&str>) -> Result<(), ObservabilityError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directive = level.unwrap_or(DEFAULT_LOG_LEVEL);
            EnvFilter::try_new(directive).map_err(|e| ObservabilityError::InvalidFilter {
                filter: directive.to_string(),
                reason: e.to_string(),
            })?
        }
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|_| ObservabilityError::AlreadyInitialized)
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
