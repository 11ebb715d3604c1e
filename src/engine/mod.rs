//! Query entry point
//!
//! `SearchEngine::query` plans a raw query, skips the scan when some token
//! can never be satisfied, and otherwise scans the dataset.

mod engine;
mod errors;

pub use engine::SearchEngine;
pub use errors::{EngineError, EngineResult};
