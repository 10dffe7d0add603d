#![forbid(unsafe_code)]
//! sqltoy-operators: joins, grouping, aggregates, projection, sort, pagination.
//!
//! Design intent:
//! - Each SQL clause is a plain function from tables to a table. Functions that
//!   build new rows borrow their inputs; functions that only drop, reorder or
//!   annotate rows take the table by value and hand it back.
//! - Aggregates are the one deliberate mutation: a grouped table is threaded
//!   through `count`, `avg`, ... and gains one column per call.
//! - Every clause also exists as an `Operator` stage so `sqltoy-exec` can run
//!   a whole pipeline over one input table.

pub mod aggregate;
pub mod distinct;
pub mod filter;
pub mod group;
pub mod join;
pub mod paginate;
pub mod project;
pub mod sort;
pub mod traits;

pub use aggregate::{aggregate, annotate, array_agg, avg, count, max, min, sum, Aggregate, AggregateFn};
pub use distinct::{distinct, Distinct};
pub use filter::{filter, having, Filter};
pub use group::{group_by, GroupBy};
pub use join::{
    cross_join, full_join, inner_join, join, left_join, left_join_with, right_join,
    right_join_with, Join, JoinType,
};
pub use paginate::{limit, offset, Limit, Offset};
pub use project::{select, Aliases, Select};
pub use sort::{by_columns, sort_by, SortBy, SortKey};
pub use traits::{Comparator, OpError, Operator, Predicate};
