//! SchemaMigrator - physical DDL for dynamic tables
//!
//! Ordering against the catalog is owned by the engine:
//! - table creation: catalog rows and `CREATE TABLE` share one transaction, so a
//!   DDL failure leaves no catalog record behind;
//! - field addition: `ADD COLUMN` runs before the field is registered, so a
//!   registered field always has a column. If registration fails afterwards the
//!   worst residue is an unregistered column, which `reconcile` reports.

use crate::descriptor::{ColumnSpec, ModelDescriptor};
use crate::error::{MorphDbError, Result};
use morphdb_commons::{Table, PRIMARY_KEY_COLUMN};
use morphdb_store::introspection::{self, PhysicalColumn};
use morphdb_store::sql::quote_ident;
use rusqlite::Connection;

#[derive(Debug, Clone, Default)]
pub struct SchemaMigrator;

impl SchemaMigrator {
    pub fn new() -> Self {
        Self
    }

    /// `CREATE TABLE` for `table` with an implicit auto-increment primary key
    /// followed by the descriptor's columns.
    pub fn create_physical_table(
        &self,
        conn: &Connection,
        table: &Table,
        descriptor: &ModelDescriptor,
    ) -> Result<()> {
        let mut columns = Vec::with_capacity(descriptor.len() + 1);
        columns.push(format!(
            "{} INTEGER PRIMARY KEY AUTOINCREMENT",
            quote_ident(PRIMARY_KEY_COLUMN)
        ));
        columns.extend(descriptor.columns.iter().map(ColumnSpec::to_sql));

        let ddl = format!(
            "CREATE TABLE {} ({})",
            quote_ident(table.internal_name.as_str()),
            columns.join(", ")
        );
        log::debug!("DDL: {}", ddl);

        conn.execute_batch(&ddl)
            .map_err(|e| ddl_failure(table, "CREATE TABLE", e))
    }

    /// `ALTER TABLE ... ADD COLUMN` on the existing physical table.
    ///
    /// The column is always created nullable: rows already in the table have no
    /// value for it and are not backfilled.
    pub fn add_physical_column(
        &self,
        conn: &Connection,
        table: &Table,
        column: &ColumnSpec,
    ) -> Result<()> {
        let column = ColumnSpec {
            nullable: true,
            ..column.clone()
        };
        let ddl = format!(
            "ALTER TABLE {} ADD COLUMN {}",
            quote_ident(table.internal_name.as_str()),
            column.to_sql()
        );
        log::debug!("DDL: {}", ddl);

        conn.execute_batch(&ddl)
            .map_err(|e| ddl_failure(table, "ADD COLUMN", e))
    }

    pub fn physical_table_exists(&self, conn: &Connection, table: &Table) -> Result<bool> {
        Ok(introspection::table_exists(conn, table.internal_name.as_str())?)
    }

    /// Physical columns of `table`, primary key included.
    pub fn physical_columns(&self, conn: &Connection, table: &Table) -> Result<Vec<PhysicalColumn>> {
        Ok(introspection::table_columns(conn, table.internal_name.as_str())?)
    }
}

fn ddl_failure(table: &Table, operation: &str, e: rusqlite::Error) -> MorphDbError {
    log::error!(
        "❌ {} failed on {} (table {}): {}",
        operation,
        table.internal_name,
        table.id,
        e
    );
    MorphDbError::DdlFailure {
        target: table.internal_name.to_string(),
        reason: format!("{}: {}", operation, e),
    }
}
