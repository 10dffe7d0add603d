//! Sample tables for the demo.

use serde_json::json;
use sqltoy_catalog::{Database, Result};

pub fn sample_database() -> Result<Database> {
    let mut db = Database::new();
    db.create_table("stories");
    db.create_table("employee");
    db.create_table("department");

    db.insert_json(
        "stories",
        json!([
            {"id": 1, "name": "The Elliptical Machine that ate Manhattan", "author_id": 1},
            {"id": 2, "name": "Queen of the Bats", "author_id": 2},
            {"id": 3, "name": "ChocoMan", "author_id": 3},
        ]),
    )?;
    db.insert_json(
        "employee",
        json!([
            {"id": 1, "name": "Josh", "department_id": 1},
            {"id": 2, "name": "Ruth", "department_id": 2},
            {"id": 3, "name": "Gregg", "department_id": 5},
        ]),
    )?;
    db.insert_json(
        "department",
        json!([
            {"id": 1, "name": "Sales"},
            {"id": 2, "name": "Marketing"},
            {"id": 3, "name": "Engineering"},
        ]),
    )?;
    Ok(db)
}
