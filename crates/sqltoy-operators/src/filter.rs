//! Row filters: WHERE before grouping, HAVING after.

use sqltoy_core::{Row, Table};

use crate::traits::{trace_op, OpError, Operator, Predicate};

/// Keep the rows matching `predicate`, in order. Name and internal row state
/// (provenance, group members) pass through untouched.
pub fn filter(mut table: Table, predicate: impl Fn(&Row) -> bool) -> Table {
    let rows_in = table.num_rows();
    table.rows.retain(|row| predicate(row));
    trace_op("filter", rows_in, table.num_rows());
    table
}

/// `filter` under its post-aggregation name.
pub fn having(table: Table, predicate: impl Fn(&Row) -> bool) -> Table {
    filter(table, predicate)
}

pub struct Filter {
    pub predicate: Predicate,
    name: &'static str,
}

impl Filter {
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            name: "filter",
        }
    }

    pub fn having(predicate: Predicate) -> Self {
        Self {
            predicate,
            name: "having",
        }
    }
}

impl Operator for Filter {
    fn name(&self) -> &'static str {
        self.name
    }

    fn eval(&self, input: Table) -> Result<Table, OpError> {
        Ok(filter(input, |row| (self.predicate)(row)))
    }
}
