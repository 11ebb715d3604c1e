//! Observable events
//!
//! Events are explicit and typed. Each carries a fixed severity.

use std::fmt;

use super::logger::Severity;

/// Observable events in a search session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Session setup
    /// Search configuration loaded
    ConfigLoaded,
    /// Schema file loaded and validated
    SchemaLoaded,
    /// Dataset ingested
    DatasetLoaded,

    // Query processing
    /// Raw query received
    QueryReceived,
    /// Clause plan built
    QueryPlanned,
    /// Token, phrase or pair left out of the plan
    ClauseDropped,
    /// Coverage gate skipped the scan
    ScanSkipped,
    /// Row scan finished
    ScanComplete,
    /// Row scan aborted by cancellation or deadline
    ScanCancelled,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::DatasetLoaded => "DATASET_LOADED",
            Event::QueryReceived => "QUERY_BEGIN",
            Event::QueryPlanned => "QUERY_PLANNED",
            Event::ClauseDropped => "CLAUSE_DROPPED",
            Event::ScanSkipped => "SCAN_SKIPPED",
            Event::ScanComplete => "SCAN_COMPLETE",
            Event::ScanCancelled => "SCAN_CANCELLED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ClauseDropped => Severity::Trace,
            Event::ScanCancelled => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
