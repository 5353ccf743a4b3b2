//! Reconciliation command

use super::Outcome;
use anyhow::Result;
use morphdb_commons::TableId;
use morphdb_core::DynamicSchemaEngine;
use std::io::Write;

pub fn reconcile(
    engine: &DynamicSchemaEngine,
    table_id: Option<TableId>,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let reports = match table_id {
        Some(id) => vec![engine.reconcile(id)?],
        None => engine.reconcile_all()?,
    };

    serde_json::to_writer_pretty(&mut *out, &reports)?;
    writeln!(out)?;

    if reports.iter().all(|r| r.is_consistent()) {
        Ok(Outcome::Ok)
    } else {
        Ok(Outcome::Drift)
    }
}
