//! Schema subsystem
//!
//! The schema is an ordered list of column descriptors. It is loaded once
//! per session and shared read-only by planning and scanning.
//!
//! # Design Principles
//!
//! - Immutable once built
//! - Column `i` describes position `i` of every row
//! - Tri-state facts are explicit, never nullable booleans

mod errors;
mod loader;
mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, Severity};
pub use loader::SchemaLoader;
pub use types::{ColumnDescriptor, DataType, MatchDiscipline, Schema, TriState};
