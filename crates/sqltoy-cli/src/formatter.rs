//! Output formatting for result tables.
//!
//! Only visible columns are rendered; join provenance and group members never
//! reach the output.

use clap::ValueEnum;
use comfy_table::{Cell, ContentArrangement, Table as TextTable};
use indexmap::IndexSet;
use sqltoy_catalog::JsonlWriter;
use sqltoy_core::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Boxed text table.
    Table,
    /// Pretty JSON array.
    Json,
    /// One JSON object per line.
    Jsonl,
}

pub fn format_table(table: &Table, format: OutputFormat) -> Result<String, Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Table => Ok(format_text(table)),
        OutputFormat::Json => {
            let rows: Vec<_> = table.rows.iter().map(|r| r.to_json()).collect();
            Ok(serde_json::to_string_pretty(&rows)?)
        }
        OutputFormat::Jsonl => {
            let mut w = JsonlWriter::to_writer(Vec::new());
            w.write_table(table)?;
            Ok(String::from_utf8(w.into_inner()?)?)
        }
    }
}

/// Header is the union of every row's columns in first-seen order. Cells a
/// row lacks stay blank, which is different from a null.
fn format_text(table: &Table) -> String {
    let mut columns: IndexSet<&str> = IndexSet::new();
    for row in &table.rows {
        columns.extend(row.columns());
    }

    let mut out = TextTable::new();
    out.set_content_arrangement(ContentArrangement::Dynamic)
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    out.set_header(columns.iter().map(Cell::new));
    for row in &table.rows {
        out.add_row(columns.iter().map(|c| match row.get(c) {
            Some(v) => Cell::new(v.to_string()),
            None => Cell::new(""),
        }));
    }

    out.to_string()
}
