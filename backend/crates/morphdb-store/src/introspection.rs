//! Read-only inspection of the physical schema.

use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension};

/// A column as the backing store reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalColumn {
    pub name: String,
    /// Declared type text, e.g. `VARCHAR(255)`
    pub declared_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

/// Whether a table named `name` exists.
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![name],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Columns of table `name` in physical order. Empty when the table is absent.
pub fn table_columns(conn: &Connection, name: &str) -> Result<Vec<PhysicalColumn>> {
    let mut stmt = conn.prepare(
        "SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1) ORDER BY cid",
    )?;
    let columns = stmt
        .query_map(params![name], |row| {
            Ok(PhysicalColumn {
                name: row.get(0)?,
                declared_type: row.get(1)?,
                not_null: row.get::<_, i64>(2)? != 0,
                primary_key: row.get::<_, i64>(3)? != 0,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_columns() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE \"t\" (id INTEGER PRIMARY KEY AUTOINCREMENT, \"a\" VARCHAR(255) NULL, \"b\" INTEGER NOT NULL)",
        )
        .unwrap();

        assert!(table_exists(&conn, "t").unwrap());
        assert!(!table_exists(&conn, "missing").unwrap());

        let columns = table_columns(&conn, "t").unwrap();
        assert_eq!(columns.len(), 3);
        assert!(columns[0].primary_key);
        assert_eq!(columns[1].name, "a");
        assert_eq!(columns[1].declared_type, "VARCHAR(255)");
        assert!(!columns[1].not_null);
        assert!(columns[2].not_null);

        assert!(table_columns(&conn, "missing").unwrap().is_empty());
    }
}
