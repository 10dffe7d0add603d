#![forbid(unsafe_code)]
//! sqltoy-exec: pipeline runtime and stage metrics.
//!
//! A `Pipeline` is an ordered list of operator stages. Running it threads one
//! table through every stage on the calling thread; the first failing stage
//! stops the run and is named in the error.

pub mod metrics;
pub mod pipeline;

pub use pipeline::{ExecError, Pipeline};
