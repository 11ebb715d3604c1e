//! Engine errors

use thiserror::Error;

use crate::config::ConfigError;
use crate::executor::ExecutorError;
use crate::planner::PlannerError;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by a search engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// Plan does not fit the schema
    #[error("{0}")]
    Planner(#[from] PlannerError),

    /// Scan failed or was interrupted
    #[error("{0}")]
    Executor(#[from] ExecutorError),

    /// Built-in date/time patterns failed to compile
    #[error("Invalid temporal pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration rejected
    #[error("{0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Returns true when a scan was cancelled or ran out of time
    pub fn is_interrupt(&self) -> bool {
        matches!(self, EngineError::Executor(e) if e.is_interrupt())
    }
}
