//! Table and field commands

use anyhow::{Context, Result};
use morphdb_commons::TableId;
use morphdb_core::{CreateTableRequest, DynamicSchemaEngine};
use std::collections::BTreeMap;
use std::io::Write;

fn to_field_map(fields: &[(String, String)]) -> Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    for (name, type_tag) in fields {
        if map.insert(name.clone(), type_tag.clone()).is_some() {
            anyhow::bail!("field '{}' declared more than once", name);
        }
    }
    Ok(map)
}

pub fn create_table(
    engine: &DynamicSchemaEngine,
    name: Option<String>,
    fields: &[(String, String)],
    out: &mut dyn Write,
) -> Result<()> {
    let request = CreateTableRequest {
        name,
        fields: to_field_map(fields)?,
    };
    let info = engine.create_table(&request).context("Failed to create table")?;
    serde_json::to_writer_pretty(&mut *out, &info)?;
    writeln!(out)?;
    Ok(())
}

pub fn add_fields(
    engine: &DynamicSchemaEngine,
    table_id: TableId,
    fields: &[(String, String)],
    out: &mut dyn Write,
) -> Result<()> {
    let info = engine
        .add_fields(table_id, &to_field_map(fields)?)
        .with_context(|| format!("Failed to add fields to table {}", table_id))?;
    serde_json::to_writer_pretty(&mut *out, &info)?;
    writeln!(out)?;
    Ok(())
}

pub fn describe(engine: &DynamicSchemaEngine, table_id: TableId, out: &mut dyn Write) -> Result<()> {
    let info = engine.table_info(table_id)?;
    serde_json::to_writer_pretty(&mut *out, &info)?;
    writeln!(out)?;
    Ok(())
}

pub fn list_tables(engine: &DynamicSchemaEngine, out: &mut dyn Write) -> Result<()> {
    let tables = engine.list_tables()?;
    serde_json::to_writer_pretty(&mut *out, &tables)?;
    writeln!(out)?;
    Ok(())
}
