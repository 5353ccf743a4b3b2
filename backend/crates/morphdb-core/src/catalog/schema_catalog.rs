//! SchemaCatalog - logical table and field metadata
//!
//! Every method takes the connection (or transaction) of the caller's unit of
//! work, so table creation can put the sequence allocation, the `tables` row,
//! the `fields` rows and the physical DDL in one transaction.

use super::CATALOG_DDL;
use crate::error::{MorphDbError, Result};
use morphdb_commons::{Field, FieldType, InternalName, Table, TableId};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    table_prefix: String,
}

impl SchemaCatalog {
    pub fn new(table_prefix: impl Into<String>) -> Self {
        Self {
            table_prefix: table_prefix.into(),
        }
    }

    /// Create the catalog relations if missing.
    pub fn bootstrap(&self, conn: &Connection) -> Result<()> {
        conn.execute_batch(CATALOG_DDL)?;
        Ok(())
    }

    /// Hand out the next internal name from `table_sequence`.
    ///
    /// The number comes from an AUTOINCREMENT rowid, never from counting
    /// existing rows, so concurrent creations cannot collide. Callers commit the
    /// allocation on its own so a failed creation burns the number instead of
    /// handing it out again.
    pub fn allocate_internal_name(&self, conn: &Connection) -> Result<InternalName> {
        conn.execute("INSERT INTO table_sequence DEFAULT VALUES", [])?;
        let seq = conn.last_insert_rowid();
        Ok(InternalName::from_sequence(&self.table_prefix, seq))
    }

    /// Register a new logical table under a previously allocated internal name.
    pub fn create_table(
        &self,
        conn: &Connection,
        internal_name: InternalName,
        external_name: Option<&str>,
    ) -> Result<Table> {
        let created_at = chrono::Utc::now().timestamp_millis();

        conn.execute(
            "INSERT INTO tables (external_name, internal_name, created_at) VALUES (?1, ?2, ?3)",
            params![external_name, internal_name.as_str(), created_at],
        )?;
        let id = TableId::new(conn.last_insert_rowid());

        log::debug!(
            "Allocated table {} -> {} (external_name={:?})",
            id,
            internal_name,
            external_name
        );

        Ok(Table {
            id,
            external_name: external_name.map(str::to_string),
            internal_name,
            created_at,
        })
    }

    /// Bulk-register the initial fields of `table`.
    ///
    /// Must run in the same transaction as [`SchemaCatalog::create_table`].
    pub fn create_fields(
        &self,
        conn: &Connection,
        table: &Table,
        fields: &[(String, FieldType)],
    ) -> Result<Vec<Field>> {
        let mut stmt =
            conn.prepare("INSERT INTO fields (name, type, table_id) VALUES (?1, ?2, ?3)")?;

        let mut created = Vec::with_capacity(fields.len());
        for (name, field_type) in fields {
            stmt.execute(params![name, field_type.tag(), table.id.as_i64()])
                .map_err(|e| duplicate_or(e, table.id, name))?;
            created.push(Field::new(name.clone(), *field_type, table.id));
        }
        Ok(created)
    }

    /// Register one additional field on an existing table.
    pub fn add_field(
        &self,
        conn: &Connection,
        table: &Table,
        name: &str,
        field_type: FieldType,
    ) -> Result<Field> {
        conn.execute(
            "INSERT INTO fields (name, type, table_id) VALUES (?1, ?2, ?3)",
            params![name, field_type.tag(), table.id.as_i64()],
        )
        .map_err(|e| duplicate_or(e, table.id, name))?;

        Ok(Field::new(name, field_type, table.id))
    }

    pub fn get_table(&self, conn: &Connection, table_id: TableId) -> Result<Table> {
        conn.query_row(
            "SELECT id, external_name, internal_name, created_at FROM tables WHERE id = ?1",
            params![table_id.as_i64()],
            table_from_row,
        )
        .optional()?
        .ok_or(MorphDbError::TableNotFound(table_id))
    }

    /// All logical tables, ordered by id.
    pub fn list_tables(&self, conn: &Connection) -> Result<Vec<Table>> {
        let mut stmt = conn.prepare(
            "SELECT id, external_name, internal_name, created_at FROM tables ORDER BY id",
        )?;
        let tables = stmt
            .query_map([], table_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tables)
    }

    /// Fields of `table` in registration order.
    pub fn list_fields(&self, conn: &Connection, table: &Table) -> Result<Vec<Field>> {
        let mut stmt =
            conn.prepare("SELECT name, type FROM fields WHERE table_id = ?1 ORDER BY id")?;
        let rows = stmt
            .query_map(params![table.id.as_i64()], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(name, tag)| -> Result<Field> {
                Ok(Field::new(name, FieldType::from_tag(&tag)?, table.id))
            })
            .collect()
    }

    /// Current field set of `table` as `name -> type`.
    pub fn get_fields(&self, conn: &Connection, table: &Table) -> Result<HashMap<String, FieldType>> {
        Ok(self
            .list_fields(conn, table)?
            .into_iter()
            .map(|f| (f.name, f.field_type))
            .collect())
    }
}

fn table_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Table> {
    Ok(Table {
        id: TableId::new(row.get(0)?),
        external_name: row.get(1)?,
        internal_name: InternalName::new(row.get::<_, String>(2)?),
        created_at: row.get(3)?,
    })
}

/// Map a UNIQUE violation on `fields` to `DuplicateField`.
fn duplicate_or(e: rusqlite::Error, table_id: TableId, name: &str) -> MorphDbError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == ErrorCode::ConstraintViolation
                && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            MorphDbError::DuplicateField {
                table_id,
                field: name.to_string(),
            }
        }
        _ => MorphDbError::from(e),
    }
}
