//! OFFSET / LIMIT. Counts past the end clamp; they never fail.

use sqltoy_core::Table;

use crate::traits::{trace_op, OpError, Operator};

pub fn offset(mut table: Table, n: usize) -> Table {
    let rows_in = table.num_rows();
    table.rows.drain(..n.min(rows_in));
    trace_op("offset", rows_in, table.num_rows());
    table
}

pub fn limit(mut table: Table, n: usize) -> Table {
    let rows_in = table.num_rows();
    table.rows.truncate(n);
    trace_op("limit", rows_in, table.num_rows());
    table
}

#[derive(Debug, Clone, Copy)]
pub struct Offset(pub usize);

impl Operator for Offset {
    fn name(&self) -> &'static str {
        "offset"
    }

    fn eval(&self, input: Table) -> Result<Table, OpError> {
        Ok(offset(input, self.0))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Limit(pub usize);

impl Operator for Limit {
    fn name(&self) -> &'static str {
        "limit"
    }

    fn eval(&self, input: Table) -> Result<Table, OpError> {
        Ok(limit(input, self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sqltoy_core::Value;

    #[test]
    fn clamps_past_the_end() {
        let t = Table::from_json_rows("t", json!([{"i": 0}, {"i": 1}, {"i": 2}])).unwrap();
        assert!(offset(t.clone(), 10).is_empty());
        assert_eq!(limit(t.clone(), 10).num_rows(), 3);
        assert!(limit(t.clone(), 0).is_empty());

        let page = limit(offset(t, 1), 1);
        assert_eq!(page.name, "t");
        assert_eq!(page.column_values("i"), vec![Value::Int(1)]);
    }
}
