//! SELECT: projection with column renaming.

use std::collections::HashMap;

use sqltoy_core::{Row, Table};

use crate::traits::{trace_op, OpError, Operator};

/// Column rename map: column -> output name.
pub type Aliases = HashMap<String, String>;

/// Project every row onto `columns`, in that order, renaming through
/// `aliases`; an empty alias keeps the column's own name. A column a row lacks
/// is left out of that row. Output rows carry no provenance or group members.
pub fn select<S: AsRef<str>>(table: &Table, columns: &[S], aliases: Option<&Aliases>) -> Table {
    let names: Vec<(&str, &str)> = columns
        .iter()
        .map(|c| {
            let column = c.as_ref();
            let output = aliases
                .and_then(|a| a.get(column))
                .map(String::as_str)
                .filter(|alias| !alias.is_empty())
                .unwrap_or(column);
            (column, output)
        })
        .collect();

    let rows: Vec<Row> = table
        .rows
        .iter()
        .map(|row| {
            let mut out = Row::with_capacity(names.len());
            for (column, output) in &names {
                if let Some(value) = row.get(column) {
                    out.insert(*output, value.clone());
                }
            }
            out
        })
        .collect();

    trace_op("select", table.num_rows(), rows.len());
    Table::with_rows(table.name.clone(), rows)
}

#[derive(Debug, Clone, Default)]
pub struct Select {
    pub columns: Vec<String>,
    pub aliases: Aliases,
}

impl Operator for Select {
    fn name(&self) -> &'static str {
        "select"
    }

    fn eval(&self, input: Table) -> Result<Table, OpError> {
        Ok(select(&input, &self.columns, Some(&self.aliases)))
    }
}
