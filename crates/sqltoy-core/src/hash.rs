//! Stable hashing of group keys.
//!
//! DISTINCT and GROUP BY partition rows by the tuple of some columns' values.
//! The tuple is hashed with a kind tag and length prefix per value, so no
//! separator can collide with data and `1` never groups with `"1"`.

use blake3::Hasher;

use crate::row::Row;
use crate::value::{exact_int, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    pub fn to_hex(&self) -> String {
        let mut s = String::with_capacity(64);
        for b in &self.0 {
            use std::fmt::Write as _;
            let _ = write!(&mut s, "{:02x}", b);
        }
        s
    }
}

impl std::fmt::Display for Hash256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Digest of a row's values for a list of key columns.
///
/// A missing column hashes like null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupKey(Hash256);

impl GroupKey {
    pub fn of<S: AsRef<str>>(row: &Row, columns: &[S]) -> Self {
        let mut h = Hasher::new();
        h.update(&(columns.len() as u64).to_le_bytes());
        for column in columns {
            hash_value(&row[column.as_ref()], &mut h);
        }
        GroupKey(Hash256(h.finalize().into()))
    }

    pub fn digest(&self) -> Hash256 {
        self.0
    }
}

const TAG_NULL: u8 = 0;
const TAG_BOOL: u8 = 1;
const TAG_INT: u8 = 2;
const TAG_FLOAT: u8 = 3;
const TAG_STR: u8 = 4;
const TAG_LIST: u8 = 5;
const TAG_RECORD: u8 = 6;

fn hash_value(value: &Value, hasher: &mut Hasher) {
    match value {
        Value::Null => {
            hasher.update(&[TAG_NULL]);
        }
        Value::Bool(b) => {
            hasher.update(&[TAG_BOOL, *b as u8]);
        }
        Value::Int(i) => hash_int(*i, hasher),
        Value::Float(f) => match exact_int(*f) {
            // Integral floats hash like the equal integer.
            Some(i) => hash_int(i, hasher),
            None => {
                let bits = if f.is_nan() { f64::NAN.to_bits() } else { f.to_bits() };
                hasher.update(&[TAG_FLOAT]);
                hasher.update(&bits.to_le_bytes());
            }
        },
        Value::Str(s) => {
            hasher.update(&[TAG_STR]);
            hash_bytes(s.as_bytes(), hasher);
        }
        Value::List(items) => {
            hasher.update(&[TAG_LIST]);
            hasher.update(&(items.len() as u64).to_le_bytes());
            for item in items {
                hash_value(item, hasher);
            }
        }
        Value::Record(map) => {
            // Record equality ignores key order, so the hash must too.
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
            hasher.update(&[TAG_RECORD]);
            hasher.update(&(entries.len() as u64).to_le_bytes());
            for (k, v) in entries {
                hash_bytes(k.as_bytes(), hasher);
                hash_value(v, hasher);
            }
        }
    }
}

fn hash_int(i: i64, hasher: &mut Hasher) {
    hasher.update(&[TAG_INT]);
    hasher.update(&i.to_le_bytes());
}

fn hash_bytes(bytes: &[u8], hasher: &mut Hasher) {
    hasher.update(&(bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(v: serde_json::Value) -> Row {
        Row::from_json(v).unwrap()
    }

    #[test]
    fn equal_numbers_share_a_key() {
        let a = row(json!({"k": 1}));
        let b = row(json!({"k": 1.0}));
        assert_eq!(GroupKey::of(&a, &["k"]), GroupKey::of(&b, &["k"]));
    }

    #[test]
    fn kinds_and_boundaries_do_not_collide() {
        let num = row(json!({"k": 1}));
        let text = row(json!({"k": "1"}));
        assert_ne!(GroupKey::of(&num, &["k"]), GroupKey::of(&text, &["k"]));

        let split_a = row(json!({"a": "x", "b": "yz"}));
        let split_b = row(json!({"a": "xy", "b": "z"}));
        assert_ne!(
            GroupKey::of(&split_a, &["a", "b"]),
            GroupKey::of(&split_b, &["a", "b"])
        );
    }

    #[test]
    fn keys_agree_with_value_equality() {
        let ab = row(json!({"k": {"a": 1, "b": {"x": 1, "y": 2}}}));
        let ba = row(json!({"k": {"b": {"y": 2, "x": 1}, "a": 1}}));
        assert_eq!(ab["k"], ba["k"]);
        assert_eq!(GroupKey::of(&ab, &["k"]), GroupKey::of(&ba, &["k"]));

        // Lists stay order-sensitive in both.
        let l1 = row(json!({"k": [1, 2]}));
        let l2 = row(json!({"k": [2, 1]}));
        assert_ne!(l1["k"], l2["k"]);
        assert_ne!(GroupKey::of(&l1, &["k"]), GroupKey::of(&l2, &["k"]));

        // 2^63 as a float is not i64::MAX, by equality or by key.
        let big_int = row(json!({"k": i64::MAX}));
        let big_float = row(json!({"k": 9_223_372_036_854_775_808.0}));
        assert_ne!(big_int["k"], big_float["k"]);
        assert_ne!(GroupKey::of(&big_int, &["k"]), GroupKey::of(&big_float, &["k"]));
    }

    #[test]
    fn missing_column_hashes_like_null() {
        let missing = row(json!({}));
        let null = row(json!({"k": null}));
        assert_eq!(GroupKey::of(&missing, &["k"]), GroupKey::of(&null, &["k"]));
        assert_eq!(GroupKey::of(&missing, &["k"]).digest().to_hex().len(), 64);
    }
}
