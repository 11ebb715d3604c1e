//! tabsearch - free-text search over fixed-schema in-memory tables
//!
//! A raw query is tokenized, planned into typed comparison clauses against
//! the schema, gated on token coverage, and scanned row by row.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod datetime;
pub mod engine;
pub mod executor;
pub mod observability;
pub mod planner;
pub mod schema;
pub mod tokenizer;

pub use config::SearchConfig;
pub use dataset::{Dataset, DatasetLoader, FieldValue, Row};
pub use engine::{EngineError, EngineResult, SearchEngine};
pub use executor::{CancellationToken, QueryResult};
pub use planner::ExplainPlan;
pub use schema::{ColumnDescriptor, DataType, MatchDiscipline, Schema, SchemaLoader, TriState};
