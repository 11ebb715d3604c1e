//! Dataset subsystem
//!
//! Rows are fixed-arity sequences of typed field values aligned with the
//! schema. A dataset is loaded once and only read afterwards.

mod errors;
mod loader;
mod value;

pub use errors::{DatasetError, DatasetResult};
pub use loader::DatasetLoader;
pub use value::{Dataset, FieldValue, Row};
