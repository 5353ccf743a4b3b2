//! Subcommand implementations for the `morphdb` binary
//!
//! Each command writes its result as JSON to the supplied writer so the same
//! code paths can be exercised from tests.

pub mod maintenance;
pub mod rows;
pub mod schema;

use crate::args::Command;
use morphdb_commons::TableId;
use morphdb_core::DynamicSchemaEngine;
use std::io::Write;

/// Outcome of a command that the process exit code should reflect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    /// Reconciliation found drift between catalog and physical tables
    Drift,
}

pub fn run(engine: &DynamicSchemaEngine, command: &Command, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    match command {
        Command::Init => {
            writeln!(out, "Database ready at {}", engine.backend().path().display())?;
        }
        Command::Tables => schema::list_tables(engine, out)?,
        Command::CreateTable { name, fields } => {
            schema::create_table(engine, name.clone(), fields, out)?
        }
        Command::AddFields { table_id, fields } => {
            schema::add_fields(engine, TableId::new(*table_id), fields, out)?
        }
        Command::Describe { table_id } => schema::describe(engine, TableId::new(*table_id), out)?,
        Command::Insert { table_id, json } => rows::insert(engine, TableId::new(*table_id), json, out)?,
        Command::Rows { table_id } => rows::list(engine, TableId::new(*table_id), out)?,
        Command::Reconcile { table_id } => {
            return maintenance::reconcile(engine, table_id.map(TableId::new), out);
        }
    }
    Ok(Outcome::Ok)
}
