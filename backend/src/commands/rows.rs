//! Row commands

use anyhow::{Context, Result};
use morphdb_commons::{FieldValue, TableId};
use morphdb_core::DynamicSchemaEngine;
use std::collections::BTreeMap;
use std::io::Write;

/// Parse a JSON object into a row. Nested arrays and objects are rejected.
pub fn parse_row(json: &str) -> Result<BTreeMap<String, FieldValue>> {
    serde_json::from_str(json).context("Row must be a JSON object of scalar values")
}

pub fn insert(
    engine: &DynamicSchemaEngine,
    table_id: TableId,
    json: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let row = parse_row(json)?;
    let row_id = engine.insert_row(table_id, &row)?;
    writeln!(out, "{}", serde_json::json!({ "id": row_id }))?;
    Ok(())
}

/// Stream every row as one JSON object per line.
pub fn list(engine: &DynamicSchemaEngine, table_id: TableId, out: &mut dyn Write) -> Result<()> {
    let mut count = 0usize;
    for row in engine.list_rows(table_id)? {
        serde_json::to_writer(&mut *out, &row?)?;
        writeln!(out)?;
        count += 1;
    }
    log::debug!("Listed {} rows from table {}", count, table_id);
    Ok(())
}
