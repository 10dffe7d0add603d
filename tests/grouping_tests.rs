//! GROUP BY, aggregates and HAVING.


use serde_json::json;
use sqltoy_core::{Row, Table, Value};
use sqltoy_operators::{
    aggregate, annotate, array_agg, avg, count, filter, group_by, having, max, min, sum,
    AggregateFn, OpError,
};
use test_data_gen::{employee, payroll};

fn by_dept() -> Table {
    group_by(&payroll(), &["dept"])
}

#[test]
fn test_example_scenario_counts() {
    let out = count(group_by(&employee(), &["department_id"]), "name").unwrap();
    assert_eq!(out.num_rows(), 3);
    assert_eq!(
        out.column_values("department_id"),
        vec![Value::Int(1), Value::Int(2), Value::Int(5)]
    );
    assert_eq!(
        out.column_values("COUNT(name)"),
        vec![Value::Int(1), Value::Int(1), Value::Int(1)]
    );
}

#[test]
fn test_group_rows_keep_members_in_input_order() {
    let grouped = by_dept();
    assert_eq!(grouped.name, "payroll");
    assert_eq!(
        grouped.column_values("dept"),
        vec![Value::from("eng"), Value::from("ops"), Value::from("sales")]
    );
    let eng_ids: Vec<Value> = grouped.rows[0]
        .members()
        .unwrap()
        .iter()
        .map(|m| m["id"].clone())
        .collect();
    assert_eq!(eng_ids, vec![Value::Int(1), Value::Int(2), Value::Int(4)]);
}

#[test]
fn test_counts_sum_to_table_size() {
    let t = payroll();
    let out = count(group_by(&t, &["dept"]), "salary").unwrap();
    let total: i64 = out
        .column_values("COUNT(salary)")
        .iter()
        .filter_map(Value::as_i64)
        .sum();
    assert_eq!(total as usize, t.num_rows());
}

#[test]
fn test_multi_column_keys() {
    let out = count(group_by(&payroll(), &["dept", "level"]), "id").unwrap();
    assert_eq!(out.num_rows(), 6);
    assert_eq!(out.rows[0].columns().collect::<Vec<_>>(), vec!["dept", "level", "COUNT(id)"]);

    let t = Table::from_json_rows(
        "t",
        json!([{"a": 1, "b": 1}, {"a": 1, "b": 2}, {"a": 1, "b": 1}, {"a": 1}]),
    )
    .unwrap();
    let out = count(group_by(&t, &["a", "b"]), "a").unwrap();
    assert_eq!(
        out.column_values("COUNT(a)"),
        vec![Value::Int(2), Value::Int(1), Value::Int(1)]
    );
    // A missing key column groups like null and stays absent on the group row.
    assert!(!out.rows[2].contains("b"));
}

#[test]
fn test_chained_aggregates_accumulate_columns() {
    let t = filter(payroll(), |r| r["dept"] != "sales");
    let out = group_by(&t, &["dept"]);
    let out = count(out, "id").unwrap();
    let out = max(out, "salary").unwrap();
    let out = min(out, "salary").unwrap();
    let out = sum(out, "salary").unwrap();
    let out = avg(out, "salary").unwrap();

    assert_eq!(
        out.rows[0].columns().collect::<Vec<_>>(),
        vec!["dept", "COUNT(id)", "MAX(salary)", "MIN(salary)", "SUM(salary)", "AVG(salary)"]
    );

    let eng = &out.rows[0];
    assert_eq!(eng["MAX(salary)"], Value::Int(120));
    assert_eq!(eng["MIN(salary)"], Value::Float(80.5));
    assert_eq!(eng["SUM(salary)"], Value::Float(300.5));
    let mean = eng["AVG(salary)"].as_f64().unwrap();
    assert!((mean - 300.5 / 3.0).abs() < 1e-9);

    // Null salaries are skipped by MIN/MAX/SUM/AVG.
    let ops = &out.rows[1];
    assert_eq!(ops["COUNT(id)"], Value::Int(2));
    assert_eq!(ops["MAX(salary)"], Value::Int(70));
    assert_eq!(ops["SUM(salary)"], Value::Int(70));
    assert_eq!(ops["AVG(salary)"], Value::Float(70.0));
}

#[test]
fn test_array_agg_renders_json_text() {
    let out = array_agg(by_dept(), "id").unwrap();
    let out = array_agg(out, "salary").unwrap();
    assert_eq!(out.rows[0]["ARRAY_AGG(id)"], "[1,2,4]");
    assert_eq!(out.rows[1]["ARRAY_AGG(salary)"], "[null,70]");
    assert_eq!(out.rows[2]["ARRAY_AGG(salary)"], "[null]");
}

#[test]
fn test_empty_group_aggregate_fails_without_partial_writes() {
    let mut grouped = by_dept();
    let before = grouped.clone();
    let err = annotate(&mut grouped, AggregateFn::Avg, "salary").unwrap_err();
    assert!(matches!(
        err,
        OpError::EmptyGroupAggregate { aggregate: AggregateFn::Avg, ref column } if column == "salary"
    ));
    assert_eq!(grouped, before);
}

#[test]
fn test_aggregate_errors() {
    let err = aggregate(payroll(), AggregateFn::Count, "id").unwrap_err();
    assert!(matches!(err, OpError::NotGrouped { row: 0, .. }));

    let err = sum(by_dept(), "dept").unwrap_err();
    assert!(matches!(err, OpError::NonNumeric { kind: "string", .. }));

    let mixed = Table::from_json_rows("m", json!([{"g": 1, "v": 3}, {"g": 1, "v": "x"}])).unwrap();
    let err = max(group_by(&mixed, &["g"]), "v").unwrap_err();
    assert!(matches!(
        err,
        OpError::Incomparable { left: "number", right: "string", .. }
    ));
}

#[test]
fn test_min_max_over_strings() {
    let out = max(group_by(&employee(), &[] as &[&str]), "name").unwrap();
    let out = min(out, "name").unwrap();
    assert_eq!(out.num_rows(), 1);
    assert_eq!(out.rows[0]["MAX(name)"], "Ruth");
    assert_eq!(out.rows[0]["MIN(name)"], "Gregg");
}

#[test]
fn test_having_filters_groups_after_aggregation() {
    let out = count(by_dept(), "id").unwrap();
    let out = having(out, |r: &Row| r["COUNT(id)"].as_i64().is_some_and(|n| n > 1));
    assert_eq!(
        out.column_values("dept"),
        vec![Value::from("eng"), Value::from("ops")]
    );
    // Members survive HAVING, so further aggregates still work.
    let out = array_agg(out, "id").unwrap();
    assert_eq!(out.rows[1]["ARRAY_AGG(id)"], "[3,5]");
}
