//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero status.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::dataset::DatasetError;
use crate::engine::EngineError;
use crate::observability::ObservabilityError;
use crate::schema::SchemaError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Schema(#[from] SchemaError),

    #[error("{0}")]
    Dataset(#[from] DatasetError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("{0}")]
    Logging(#[from] ObservabilityError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Schema(_) => "TABSEARCH_CLI_SCHEMA_ERROR",
            Self::Dataset(_) => "TABSEARCH_CLI_DATASET_ERROR",
            Self::Config(_) => "TABSEARCH_CLI_CONFIG_ERROR",
            Self::Engine(_) => "TABSEARCH_CLI_QUERY_ERROR",
            Self::Logging(_) => "TABSEARCH_CLI_LOGGING_ERROR",
            Self::Io(_) | Self::Json(_) => "TABSEARCH_CLI_IO_ERROR",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
