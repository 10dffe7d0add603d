//! SORT BY with a caller comparator, plus column-key comparators.

use std::cmp::Ordering;

use sqltoy_core::config::NullOrdering;
use sqltoy_core::{Row, Table, Value};

use crate::traits::{trace_op, Comparator, OpError, Operator};

/// Stable sort: rows the comparator calls equal keep their input order.
pub fn sort_by(mut table: Table, compare: impl FnMut(&Row, &Row) -> Ordering) -> Table {
    table.rows.sort_by(compare);
    trace_op("sort_by", table.num_rows(), table.num_rows());
    table
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub descending: bool,
}

impl SortKey {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }
}

/// Comparator ordering rows by `keys` in turn.
///
/// Nulls (and missing columns) go where `nulls` says regardless of direction;
/// other values use `Value::total_cmp`.
pub fn by_columns(
    keys: &[SortKey],
    nulls: NullOrdering,
) -> impl Fn(&Row, &Row) -> Ordering + Send + Sync + 'static {
    let keys = keys.to_vec();
    move |a: &Row, b: &Row| {
        for key in &keys {
            match key_cmp(&a[key.column.as_str()], &b[key.column.as_str()], key.descending, nulls) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }
}

fn key_cmp(a: &Value, b: &Value, descending: bool, nulls: NullOrdering) -> Ordering {
    let null_first = match nulls {
        NullOrdering::First => Ordering::Less,
        NullOrdering::Last => Ordering::Greater,
    };
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => null_first,
        (false, true) => null_first.reverse(),
        (false, false) => {
            let ord = a.total_cmp(b);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
    }
}

pub struct SortBy {
    pub comparator: Comparator,
}

impl Operator for SortBy {
    fn name(&self) -> &'static str {
        "sort_by"
    }

    fn eval(&self, input: Table) -> Result<Table, OpError> {
        Ok(sort_by(input, |a, b| (self.comparator)(a, b)))
    }
}
