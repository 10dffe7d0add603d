//! Operator trait + common interfaces.
//!
//! The pipeline runtime calls `eval(...)` on each stage in order, handing the
//! previous stage's output table to the next.

use std::cmp::Ordering;
use std::sync::Arc;

use sqltoy_core::{Row, Table};
use thiserror::Error;

use crate::aggregate::AggregateFn;

/// Row filter held by a stage (join condition, WHERE, HAVING).
pub type Predicate = Arc<dyn Fn(&Row) -> bool + Send + Sync>;

/// Three-way row comparator held by a sort stage.
pub type Comparator = Arc<dyn Fn(&Row, &Row) -> Ordering + Send + Sync>;

#[derive(Debug, Error)]
pub enum OpError {
    #[error("{aggregate}({column}) over a group with no values")]
    EmptyGroupAggregate {
        aggregate: AggregateFn,
        column: String,
    },

    #[error("{aggregate}({column}) needs grouped rows, but row {row} has no group members")]
    NotGrouped {
        aggregate: AggregateFn,
        column: String,
        row: usize,
    },

    #[error("{aggregate}({column}) expects numbers, found {kind} {value}")]
    NonNumeric {
        aggregate: AggregateFn,
        column: String,
        kind: &'static str,
        value: String,
    },

    #[error("{aggregate}({column}) cannot compare a {left} with a {right}")]
    Incomparable {
        aggregate: AggregateFn,
        column: String,
        left: &'static str,
        right: &'static str,
    },

    #[error("outer join cannot pad an unmatched row: table '{table}' has no rows to take columns from")]
    EmptyPaddingTable { table: String },
}

/// Trait that all pipeline stages implement.
///
/// Invariants:
/// - `eval` must be deterministic given the same input.
/// - `eval` must not touch anything but its input and its own configuration.
pub trait Operator: Send + Sync + 'static {
    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    /// Transform one table into the next.
    fn eval(&self, input: Table) -> Result<Table, OpError>;
}

#[cfg(feature = "tracing")]
pub(crate) fn trace_op(op: &'static str, rows_in: usize, rows_out: usize) {
    tracing::trace!(op, rows_in, rows_out, "operator evaluated");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn trace_op(_op: &'static str, _rows_in: usize, _rows_out: usize) { /* no-op */
}
