//! DISTINCT over a column list.

use indexmap::IndexMap;
use sqltoy_core::hash::GroupKey;
use sqltoy_core::{Row, Table};

use crate::traits::{trace_op, OpError, Operator};

/// One row per distinct key, holding only `columns`.
///
/// Keys are ordered by first occurrence; the values kept are those of the
/// last row seen with that key. Columns a row lacks stay absent.
pub fn distinct<S: AsRef<str>>(table: &Table, columns: &[S]) -> Table {
    let mut seen: IndexMap<GroupKey, &Row> = IndexMap::new();
    for row in &table.rows {
        // `insert` on an existing key replaces the value in place.
        seen.insert(GroupKey::of(row, columns), row);
    }

    let rows: Vec<Row> = seen
        .values()
        .map(|row| {
            let mut out = Row::with_capacity(columns.len());
            for column in columns {
                if let Some(value) = row.get(column.as_ref()) {
                    out.insert(column.as_ref(), value.clone());
                }
            }
            out
        })
        .collect();

    trace_op("distinct", table.num_rows(), rows.len());
    Table::with_rows(table.name.clone(), rows)
}

#[derive(Debug, Clone, Default)]
pub struct Distinct {
    pub columns: Vec<String>,
}

impl Operator for Distinct {
    fn name(&self) -> &'static str {
        "distinct"
    }

    fn eval(&self, input: Table) -> Result<Table, OpError> {
        Ok(distinct(&input, &self.columns))
    }
}
