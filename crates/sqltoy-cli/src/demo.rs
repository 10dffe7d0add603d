//! Canned queries over the sample database.

use sqltoy_catalog::Database;
use sqltoy_core::config::EngineConfig;
use sqltoy_core::{Row, Table};
use sqltoy_exec::Pipeline;
use sqltoy_operators::{
    array_agg, cross_join, full_join, group_by, inner_join, left_join_with, right_join_with,
    select, AggregateFn, Aliases, JoinType, SortKey,
};

pub type DemoResult = Result<Table, Box<dyn std::error::Error>>;

pub struct Query {
    pub name: &'static str,
    pub sql: &'static str,
    pub run: fn(&Database, &EngineConfig) -> DemoResult,
}

pub const QUERIES: &[Query] = &[
    Query {
        name: "cross",
        sql: "SELECT * FROM employee CROSS JOIN department",
        run: cross,
    },
    Query {
        name: "inner",
        sql: "SELECT * FROM employee JOIN department ON employee.department_id = department.id",
        run: inner,
    },
    Query {
        name: "left",
        sql: "SELECT * FROM employee LEFT JOIN department ON employee.department_id = department.id",
        run: left,
    },
    Query {
        name: "right",
        sql: "SELECT * FROM employee RIGHT JOIN department ON employee.department_id = department.id",
        run: right,
    },
    Query {
        name: "full",
        sql: "SELECT * FROM employee FULL JOIN department ON employee.department_id = department.id",
        run: full,
    },
    Query {
        name: "group",
        sql: "SELECT department_id FROM employee GROUP BY department_id",
        run: group,
    },
    Query {
        name: "array_agg",
        sql: "SELECT department_id, ARRAY_AGG(name) FROM employee GROUP BY department_id",
        run: names_by_department,
    },
    Query {
        name: "select",
        sql: "SELECT id, name FROM employee",
        run: project,
    },
    Query {
        name: "headcount",
        sql: "SELECT department.name AS department, COUNT(employee.id) AS headcount \
              FROM employee JOIN department ON employee.department_id = department.id \
              GROUP BY department.name HAVING COUNT(employee.id) >= 1 \
              ORDER BY department DESC LIMIT 2",
        run: headcount,
    },
];

pub fn find(name: &str) -> Option<&'static Query> {
    QUERIES.iter().find(|q| q.name == name)
}

fn same_department(r: &Row) -> bool {
    r["employee.department_id"] == r["department.id"]
}

fn cross(db: &Database, _: &EngineConfig) -> DemoResult {
    Ok(cross_join(db.from("employee")?, db.from("department")?))
}

fn inner(db: &Database, _: &EngineConfig) -> DemoResult {
    Ok(inner_join(
        db.from("employee")?,
        db.from("department")?,
        same_department,
    ))
}

fn left(db: &Database, cfg: &EngineConfig) -> DemoResult {
    Ok(left_join_with(
        db.from("employee")?,
        db.from("department")?,
        same_department,
        cfg.outer_join_padding,
    )?)
}

fn right(db: &Database, cfg: &EngineConfig) -> DemoResult {
    Ok(right_join_with(
        db.from("employee")?,
        db.from("department")?,
        same_department,
        cfg.outer_join_padding,
    )?)
}

fn full(db: &Database, cfg: &EngineConfig) -> DemoResult {
    Ok(full_join(
        db.from("employee")?,
        db.from("department")?,
        same_department,
        cfg.outer_join_padding,
    )?)
}

fn group(db: &Database, _: &EngineConfig) -> DemoResult {
    Ok(group_by(db.from("employee")?, &["department_id"]))
}

fn names_by_department(db: &Database, _: &EngineConfig) -> DemoResult {
    let grouped = group_by(db.from("employee")?, &["department_id"]);
    Ok(array_agg(grouped, "name")?)
}

fn project(db: &Database, _: &EngineConfig) -> DemoResult {
    Ok(select(db.from("employee")?, &["id", "name"], None))
}

fn headcount(db: &Database, cfg: &EngineConfig) -> DemoResult {
    let (pipeline, input) = headcount_pipeline(db, cfg)?;
    Ok(pipeline.run(input)?)
}

/// The `headcount` query as pipeline stages over `employee`.
pub fn headcount_pipeline(
    db: &Database,
    cfg: &EngineConfig,
) -> Result<(Pipeline, Table), Box<dyn std::error::Error>> {
    let aliases = Aliases::from([
        ("department.name".to_string(), "department".to_string()),
        ("COUNT(employee.id)".to_string(), "headcount".to_string()),
    ]);
    let pipeline = Pipeline::new(cfg.clone())
        .join(JoinType::Inner, db.from("department")?.clone(), same_department)
        .group_by(&["department.name"])
        .aggregate(AggregateFn::Count, "employee.id")
        .having(|r| r["COUNT(employee.id)"].as_i64().is_some_and(|n| n >= 1))
        .select(&["department.name", "COUNT(employee.id)"], aliases)
        .order_by(&[SortKey::desc("department")])
        .limit(2);
    Ok((pipeline, db.from("employee")?.clone()))
}
