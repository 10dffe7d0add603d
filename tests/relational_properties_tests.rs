//! DISTINCT, SELECT, SORT BY and pagination properties.


use std::cmp::Ordering;
use std::collections::HashSet;

use serde_json::json;
use sqltoy_core::config::NullOrdering;
use sqltoy_core::hash::GroupKey;
use sqltoy_core::{Table, Value};
use sqltoy_operators::{
    by_columns, distinct, group_by, left_join, limit, offset, select, sort_by, Aliases, SortKey,
};
use test_data_gen::{department, employee, generate_keyed, payroll, same_department};

#[test]
fn test_distinct_projections_are_unique() {
    let t = generate_keyed("t", 20, 3);
    let out = distinct(&t, &["k"]);
    assert_eq!(out.num_rows(), 3);
    let keys: HashSet<GroupKey> = out.rows.iter().map(|r| GroupKey::of(r, &["k"])).collect();
    assert_eq!(keys.len(), out.num_rows());
    assert_eq!(out.name, "t");
}

#[test]
fn test_distinct_keeps_last_values_in_first_occurrence_order() {
    let t = Table::from_json_rows(
        "t",
        json!([
            {"k": "b", "v": 1},
            {"k": "a", "v": 2},
            {"k": "b", "v": 3},
        ]),
    )
    .unwrap();
    let out = distinct(&t, &["k"]);
    assert_eq!(out.column_values("k"), vec![Value::from("b"), Value::from("a")]);

    // Projection only keeps the listed columns.
    assert!(!out.rows[0].contains("v"));

    let t = Table::from_json_rows("t", json!([{"k": 1}, {"k": 1.0}, {"j": 0}])).unwrap();
    let out = distinct(&t, &["k"]);
    assert_eq!(out.num_rows(), 2);
    assert_eq!(out.rows[0]["k"], Value::Float(1.0));
    assert!(out.rows[1].is_empty());
}

#[test]
fn test_select_keys_are_exactly_the_aliased_list() {
    let aliases = Aliases::from([("id".to_string(), "x".to_string())]);
    let out = select(&employee(), &["id", "name"], Some(&aliases));
    for row in &out.rows {
        let keys: HashSet<&str> = row.columns().collect();
        assert_eq!(keys, HashSet::from(["x", "name"]));
    }
    assert_eq!(out.column_values("x"), vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
}

#[test]
fn test_select_drops_internal_state() {
    let joined = left_join(&employee(), &department(), same_department).unwrap();
    let out = select(&joined, &["employee.name", "department.name"], None);
    assert!(out.rows.iter().all(|r| r.provenance().is_none()));

    let grouped = group_by(&payroll(), &["dept"]);
    let out = select(&grouped, &["dept"], None);
    assert!(out.rows.iter().all(|r| r.members().is_none()));
    assert_eq!(
        serde_json::to_value(&out).unwrap(),
        json!({"name": "payroll", "rows": [{"dept": "eng"}, {"dept": "ops"}, {"dept": "sales"}]})
    );
}

#[test]
fn test_sort_with_constant_comparator_preserves_order() {
    let t = generate_keyed("t", 12, 5);
    let out = sort_by(t.clone(), |_, _| Ordering::Equal);
    assert_eq!(out, t);
}

#[test]
fn test_sort_by_caller_comparator_is_stable() {
    let t = generate_keyed("t", 9, 3);
    let out = sort_by(t, |a, b| a["k"].total_cmp(&b["k"]));
    let pairs: Vec<(Value, Value)> = out
        .rows
        .iter()
        .map(|r| (r["k"].clone(), r["i"].clone()))
        .collect();
    assert_eq!(pairs[0], (Value::Int(0), Value::Int(0)));
    assert_eq!(pairs[1], (Value::Int(0), Value::Int(3)));
    assert_eq!(pairs[2], (Value::Int(0), Value::Int(6)));
    assert_eq!(pairs[3], (Value::Int(1), Value::Int(1)));
}

#[test]
fn test_sort_by_columns_places_nulls() {
    let keys = [SortKey::asc("salary")];
    let first = sort_by(payroll(), by_columns(&keys, NullOrdering::First));
    let last = sort_by(payroll(), by_columns(&keys, NullOrdering::Last));

    // ids 3 (null) and 6 (missing) both sort as null.
    assert_eq!(
        first.column_values("id"),
        [3, 6, 5, 4, 2, 1].map(Value::from).to_vec()
    );
    assert_eq!(
        last.column_values("id"),
        [5, 4, 2, 1, 3, 6].map(Value::from).to_vec()
    );
}

#[test]
fn test_limit_offset_is_a_clamped_slice() {
    let t = generate_keyed("t", 10, 10);
    for k in [0usize, 3, 9, 10, 15] {
        for n in [0usize, 1, 4, 20] {
            let out = limit(offset(t.clone(), k), n);
            let start = k.min(t.num_rows());
            let end = (k + n).min(t.num_rows());
            assert_eq!(out.rows, t.rows[start..end].to_vec(), "k={k} n={n}");
        }
    }
}

#[test]
fn test_record_keys_group_regardless_of_field_order() {
    let t = Table::from_json_rows(
        "t",
        json!([
            {"k": {"a": 1, "b": 2}, "v": 1},
            {"k": {"b": 2, "a": 1}, "v": 2},
        ]),
    )
    .unwrap();
    assert_eq!(t.rows[0]["k"], t.rows[1]["k"]);

    let out = distinct(&t, &["k"]);
    assert_eq!(out.num_rows(), 1);

    let groups = group_by(&t, &["k"]);
    assert_eq!(groups.num_rows(), 1);
    assert_eq!(groups.rows[0].members().map(<[sqltoy_core::Row]>::len), Some(2));
}
