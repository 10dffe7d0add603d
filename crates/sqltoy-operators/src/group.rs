//! GROUP BY: partition rows and keep each group's members for aggregates.

use indexmap::IndexMap;
use sqltoy_core::hash::GroupKey;
use sqltoy_core::{Row, Table};

use crate::traits::{trace_op, OpError, Operator};

/// One row per distinct key of `columns`, in first-occurrence order.
///
/// Each group row holds the key columns (read from its first member) and an
/// owned copy of every member row in input order. Aggregates read the members;
/// nothing they do reaches back into `table`.
pub fn group_by<S: AsRef<str>>(table: &Table, columns: &[S]) -> Table {
    let mut groups: IndexMap<GroupKey, Vec<Row>> = IndexMap::new();
    for row in &table.rows {
        groups
            .entry(GroupKey::of(row, columns))
            .or_default()
            .push(row.clone());
    }

    let rows: Vec<Row> = groups
        .into_values()
        .map(|members| {
            let mut out = Row::with_capacity(columns.len());
            if let Some(first) = members.first() {
                for column in columns {
                    if let Some(value) = first.get(column.as_ref()) {
                        out.insert(column.as_ref(), value.clone());
                    }
                }
            }
            out.set_members(members);
            out
        })
        .collect();

    trace_op("group_by", table.num_rows(), rows.len());
    Table::with_rows(table.name.clone(), rows)
}

#[derive(Debug, Clone, Default)]
pub struct GroupBy {
    pub columns: Vec<String>,
}

impl Operator for GroupBy {
    fn name(&self) -> &'static str {
        "group_by"
    }

    fn eval(&self, input: Table) -> Result<Table, OpError> {
        Ok(group_by(&input, &self.columns))
    }
}
