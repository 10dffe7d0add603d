//! Tables: a name plus an ordered sequence of rows.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::id::RowId;
use crate::row::Row;
use crate::value::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Qualifier for this table's columns in joins. Empty means "unqualified".
    pub name: String,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn with_rows(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Build a table from a JSON array of objects.
    pub fn from_json_rows(name: impl Into<String>, rows: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Array(items) = rows else {
            return Err(Error::Schema("table rows must be a JSON array".into()));
        };
        let rows = items
            .into_iter()
            .map(Row::from_json)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::with_rows(name, rows))
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Column name as it appears in a joined row: `name.column`, or the bare
    /// column when the table is unnamed.
    pub fn qualify(&self, column: &str) -> String {
        if self.name.is_empty() {
            column.to_string()
        } else {
            format!("{}.{}", self.name, column)
        }
    }

    /// Same rows under another name. Self-joins alias one side so the two
    /// copies qualify to different columns.
    pub fn aliased(&self, name: impl Into<String>) -> Table {
        Table {
            name: name.into(),
            rows: self.rows.clone(),
        }
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.get(id.index())
    }

    pub fn enumerate(&self) -> impl Iterator<Item = (RowId, &Row)> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| (RowId::new(i), row))
    }

    /// Column names of the first row, which stands in for the table's schema.
    pub fn first_row_columns(&self) -> Option<Vec<String>> {
        self.rows
            .first()
            .map(|row| row.columns().map(str::to_string).collect())
    }

    /// One column's values, null where a row lacks it.
    pub fn column_values(&self, column: &str) -> Vec<Value> {
        self.rows.iter().map(|row| row[column].clone()).collect()
    }
}
