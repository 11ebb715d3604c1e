//! Structured event logger
//!
//! - Explicit severity levels
//! - One log line = one event
//! - Deterministic field ordering (alphabetical by key)
//!
//! Lines are emitted through `tracing`; the subscriber decides where they
//! go and which levels are kept.

use std::fmt;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, process exits
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Event logger backed by `tracing`
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let fields = render_fields(fields);
        match severity {
            Severity::Trace => tracing::debug!(event = event, "{}", fields),
            Severity::Info => tracing::info!(event = event, "{}", fields),
            Severity::Warn => tracing::warn!(event = event, "{}", fields),
            Severity::Error | Severity::Fatal => {
                tracing::error!(event = event, severity = severity.as_str(), "{}", fields)
            }
        }
    }
}

/// Renders fields as `key=value` pairs sorted by key.
///
/// Values containing whitespace, quotes or `=` are quoted and escaped.
pub fn render_fields(fields: &[(&str, &str)]) -> String {
    let mut sorted: Vec<_> = fields.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);

    let mut output = String::with_capacity(64);
    for (position, (key, value)) in sorted.into_iter().enumerate() {
        if position > 0 {
            output.push(' ');
        }
        output.push_str(key);
        output.push('=');
        if needs_quoting(value) {
            output.push_str(&format!("{:?}", value));
        } else {
            output.push_str(value);
        }
    }
    output
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '"' || c == '=')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Trace.as_str(), "TRACE");
        assert_eq!(Severity::Fatal.to_string(), "FATAL");
    }

    #[test]
    fn test_fields_sorted() {
        let rendered = render_fields(&[("zeta", "1"), ("alpha", "2"), ("mid", "3")]);
        assert_eq!(rendered, "alpha=2 mid=3 zeta=1");
    }

    #[test]
    fn test_fields_quoted() {
        let rendered = render_fields(&[("query", "ne hdbuy"), ("empty", "")]);
        assert_eq!(rendered, "empty=\"\" query=\"ne hdbuy\"");
    }

    #[test]
    fn test_no_fields() {
        assert_eq!(render_fields(&[]), "");
    }

    #[test]
    fn test_log_without_subscriber() {
        // No subscriber installed: must not panic
        Logger::log(Severity::Info, "TEST_EVENT", &[("rows", "42")]);
        Logger::log(Severity::Fatal, "TEST_FAILURE", &[("reason", "test")]);
    }
}
