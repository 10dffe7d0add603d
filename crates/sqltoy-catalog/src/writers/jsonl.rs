//! NDJSON writer: one JSON object per row, visible fields only.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use sqltoy_core::{Row, Table};

use crate::error::Result;

pub struct JsonlWriter<W: Write> {
    writer: BufWriter<W>,
    rows_written: usize,
}

impl JsonlWriter<File> {
    pub fn to_path(path: impl AsRef<Path>) -> Result<Self> {
        let f = File::create(path)?;
        Ok(Self::to_writer(f))
    }
}

impl<W: Write> JsonlWriter<W> {
    pub fn to_writer(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            rows_written: 0,
        }
    }

    pub fn write_row(&mut self, row: &Row) -> Result<()> {
        // Row serializes its column map only; provenance and members stay out.
        serde_json::to_writer(&mut self.writer, row)?;
        self.writer.write_all(b"\n")?;
        self.rows_written += 1;
        Ok(())
    }

    /// Write every row of `table` and flush.
    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        for row in &table.rows {
            self.write_row(row)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| e.into_error().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn writes_visible_fields_per_line() {
        let t = Table::from_json_rows(
            "e",
            json!([{"id": 1, "name": "Josh"}, {"id": 2, "name": null}]),
        )
        .unwrap();
        let grouped = {
            let mut t = t.clone();
            let member = t.rows[1].clone();
            t.rows[0].set_members(vec![member]);
            t
        };
        assert_eq!(grouped.rows[0].members().map(<[Row]>::len), Some(1));

        let mut w = JsonlWriter::to_writer(Vec::new());
        w.write_table(&grouped).unwrap();
        assert_eq!(w.rows_written(), 2);
        let out = String::from_utf8(w.into_inner().unwrap()).unwrap();
        assert_eq!(out, "{\"id\":1,\"name\":\"Josh\"}\n{\"id\":2,\"name\":null}\n");
    }
}
