//! In-memory database: tables by name, in creation order.

use indexmap::IndexMap;
use sqltoy_core::{Row, Table};

use crate::error::{CatalogError, Result};

#[derive(Debug, Clone, Default)]
pub struct Database {
    tables: IndexMap<String, Table>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table called `name`, replacing any table of that name.
    pub fn create_table(&mut self, name: impl Into<String>) -> &mut Table {
        let name = name.into();
        if self.tables.contains_key(&name) {
            #[cfg(feature = "tracing")]
            tracing::warn!(table = %name, "create_table replaces existing table");
        }
        let table = Table::new(name.clone());
        let (index, _) = self.tables.insert_full(name, table);
        &mut self.tables[index]
    }

    /// Append rows to `table`, keeping their order.
    pub fn insert_into(
        &mut self,
        table: &str,
        rows: impl IntoIterator<Item = Row>,
    ) -> Result<usize> {
        let target = self
            .tables
            .get_mut(table)
            .ok_or_else(|| CatalogError::UnknownTable(table.to_string()))?;
        let before = target.num_rows();
        target.rows.extend(rows);
        let added = target.num_rows() - before;
        #[cfg(feature = "tracing")]
        tracing::debug!(table, added, "insert_into");
        Ok(added)
    }

    /// `insert_into` from JSON: one object is one row, an array is many.
    pub fn insert_json(&mut self, table: &str, rows: serde_json::Value) -> Result<usize> {
        let rows = match rows {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(Row::from_json)
                .collect::<sqltoy_core::Result<Vec<_>>>()?,
            single => vec![Row::from_json(single)?],
        };
        self.insert_into(table, rows)
    }

    /// The stored table, for reading. Operators take it by reference or
    /// clone it when a stage consumes its input.
    pub fn from(&self, table: &str) -> Result<&Table> {
        self.tables
            .get(table)
            .ok_or_else(|| CatalogError::UnknownTable(table.to_string()))
    }

    pub fn contains(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Every table as `{name: {"name": .., "rows": [..]}}`.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        let mut out = serde_json::Map::with_capacity(self.tables.len());
        for (name, table) in &self.tables {
            out.insert(name.clone(), serde_json::to_value(table)?);
        }
        Ok(serde_json::Value::Object(out))
    }
}
