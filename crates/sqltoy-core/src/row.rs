//! Rows: an ordered column map plus engine-internal state.
//!
//! The column map is the only user-visible part of a row. Join provenance and
//! group members are carried beside it and are dropped by serialization,
//! projection and the writers.

use std::ops::Index;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::id::RowId;
use crate::value::Value;

static NULL: Value = Value::Null;

/// Origin of a joined row: the input rows it was built from.
///
/// Outer-join padding rows have only the side they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Provenance {
    pub left: Option<RowId>,
    pub right: Option<RowId>,
}

impl Provenance {
    pub fn pair(left: RowId, right: RowId) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
        }
    }

    pub fn left_only(left: RowId) -> Self {
        Self {
            left: Some(left),
            right: None,
        }
    }

    pub fn right_only(right: RowId) -> Self {
        Self {
            left: None,
            right: Some(right),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: IndexMap<String, Value>,
    provenance: Option<Provenance>,
    members: Option<Vec<Row>>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(n),
            ..Self::default()
        }
    }

    /// Build a row from a JSON object, keeping its key order.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .map(|(k, v)| (k, Value::from(v)))
                .collect()),
            other => Err(Error::Schema(format!(
                "a row must be a JSON object, got {}",
                other
            ))),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Set a column. A new column goes last; an existing one keeps its place.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(column.into(), value.into())
    }

    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.fields.shift_remove(column)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> IndexMap<String, Value> {
        self.fields
    }

    /// Copy of this row's columns without any internal state.
    pub fn visible(&self) -> Row {
        Row {
            fields: self.fields.clone(),
            ..Row::default()
        }
    }

    pub fn provenance(&self) -> Option<Provenance> {
        self.provenance
    }

    pub fn set_provenance(&mut self, provenance: Provenance) {
        self.provenance = Some(provenance);
    }

    /// Member rows of a group row, in input order.
    pub fn members(&self) -> Option<&[Row]> {
        self.members.as_deref()
    }

    pub fn set_members(&mut self, members: Vec<Row>) {
        self.members = Some(members);
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

/// Missing columns read as null, so predicates can index freely.
impl Index<&str> for Row {
    type Output = Value;

    fn index(&self, column: &str) -> &Value {
        self.fields.get(column).unwrap_or(&NULL)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Row::default()
        }
    }
}

impl From<IndexMap<String, Value>> for Row {
    fn from(fields: IndexMap<String, Value>) -> Self {
        Row {
            fields,
            ..Row::default()
        }
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        IndexMap::<String, Value>::deserialize(deserializer).map(Row::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_columns_index_as_null() {
        let row = Row::from_json(json!({"id": 1})).unwrap();
        assert_eq!(row["id"], Value::Int(1));
        assert!(row["nope"].is_null());
        assert!(row.get("nope").is_none());
    }

    #[test]
    fn serialization_drops_internal_state() {
        let mut row: Row = [("name", "Josh")].into_iter().collect();
        row.set_provenance(Provenance::pair(RowId::new(0), RowId::new(2)));
        row.set_members(vec![row.clone()]);
        let text = serde_json::to_string(&row).unwrap();
        assert_eq!(text, r#"{"name":"Josh"}"#);
        assert_eq!(row.visible().provenance(), None);
    }

    #[test]
    fn non_object_json_is_rejected() {
        assert!(Row::from_json(json!([1, 2])).is_err());
    }
}
