//! Search configuration
//!
//! A JSON document; every field is optional:
//!
//! ```json
//! {"min_token_length": 1, "max_token_length": 100, "preview_limit": 10,
//!  "parallel_threshold": 50000, "batch_size": 4096, "deadline_ms": 250}
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::executor::{ScanOptions, DEFAULT_BATCH_SIZE, DEFAULT_PARALLEL_THRESHOLD};
use crate::observability::{log_event_with_fields, Event};
use crate::tokenizer::{Tokenizer, DEFAULT_MAX_TOKEN_LENGTH, DEFAULT_MIN_TOKEN_LENGTH};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tuning knobs for planning and scanning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Shortest token kept by the tokenizer, in characters (default: 1)
    #[serde(default = "default_min_token_length")]
    pub min_token_length: usize,

    /// Longest token kept by the tokenizer, in characters (default: 100)
    #[serde(default = "default_max_token_length")]
    pub max_token_length: usize,

    /// Matched rows included in a result's preview (default: 10)
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,

    /// Row count at which the scan goes parallel (default: 50000)
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,

    /// Rows per scan batch (default: 4096)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Scan budget in milliseconds (default: none)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_ms: Option<u64>,
}

fn default_min_token_length() -> usize {
    DEFAULT_MIN_TOKEN_LENGTH
}

fn default_max_token_length() -> usize {
    DEFAULT_MAX_TOKEN_LENGTH
}

fn default_preview_limit() -> usize {
    10
}

fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_token_length: default_min_token_length(),
            max_token_length: default_max_token_length(),
            preview_limit: default_preview_limit(),
            parallel_threshold: default_parallel_threshold(),
            batch_size: default_batch_size(),
            deadline_ms: None,
        }
    }
}

impl SearchConfig {
    /// Reads and validates a config file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&content)?;

        let path_text = path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("path", path_text.as_str())]);
        Ok(config)
    }

    /// Parses and validates an in-memory config document
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.min_token_length == 0 {
            return Err(ConfigError::Invalid {
                field: "min_token_length",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.min_token_length > self.max_token_length {
            return Err(ConfigError::Invalid {
                field: "min_token_length",
                reason: format!(
                    "{} exceeds max_token_length {}",
                    self.min_token_length, self.max_token_length
                ),
            });
        }
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid {
                field: "batch_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.deadline_ms == Some(0) {
            return Err(ConfigError::Invalid {
                field: "deadline_ms",
                reason: "must be positive when set".to_string(),
            });
        }
        Ok(())
    }

    pub fn tokenizer(&self) -> Tokenizer {
        Tokenizer::new(self.min_token_length, self.max_token_length)
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            batch_size: self.batch_size,
            parallel_threshold: self.parallel_threshold,
            deadline: self.deadline_ms.map(Duration::from_millis),
        }
    }
}
