#![forbid(unsafe_code)]
//! sqltoy-catalog: name-indexed table storage and writers.
//!
//! The operators never reach into a catalog; callers pull `Table` values out
//! with `Database::from` and hand them to operator calls.

pub mod database;
pub mod error;
pub mod writers;

pub use database::Database;
pub use error::{CatalogError, Result};
pub use writers::jsonl::JsonlWriter;
