#![forbid(unsafe_code)]
//! sqltoy: in-memory relational algebra over tables of rows.
//!
//! Facade over the workspace crates. Most callers want the free functions in
//! [`operators`] plus [`Table`] and [`Row`] from [`core`]; [`exec::Pipeline`]
//! chains the same clauses as stages.

pub use sqltoy_catalog as catalog;
pub use sqltoy_core as core;
pub use sqltoy_exec as exec;
pub use sqltoy_operators as operators;

pub use sqltoy_core::config::{EngineConfig, NullOrdering, PaddingPolicy};
pub use sqltoy_core::{Row, Table, Value};
