#![forbid(unsafe_code)]
//! sqltoy-core: values, rows, tables, row ids, group keys and config.
//!
//! Design intent:
//! - Pure data and small helpers only. No logging, no I/O.
//! - Engine-internal row state (join provenance, group members) lives in typed
//!   fields on `Row`, never in the column map, so projections and writers can
//!   not leak it.
//! - Operators live in `sqltoy-operators`; this crate is what they agree on.

pub mod config;
pub mod error;
pub mod hash;
pub mod id;
pub mod prelude;
pub mod row;
pub mod table;
pub mod value;

pub use error::{Error, Result};
pub use row::{Provenance, Row};
pub use table::Table;
pub use value::Value;
