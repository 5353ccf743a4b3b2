//! Persistent catalog of logical tables and their fields.

mod schema_catalog;

pub use schema_catalog::SchemaCatalog;

/// Catalog relations. `table_sequence` only exists to hand out internal-name
/// numbers; AUTOINCREMENT guarantees a number is never handed out twice.
pub(crate) const CATALOG_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS table_sequence (
    seq INTEGER PRIMARY KEY AUTOINCREMENT
);

CREATE TABLE IF NOT EXISTS tables (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    external_name TEXT NULL,
    internal_name TEXT NOT NULL UNIQUE,
    created_at    INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS fields (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT NOT NULL,
    type     TEXT NOT NULL,
    table_id INTEGER NOT NULL REFERENCES tables(id) ON DELETE CASCADE,
    UNIQUE (table_id, name COLLATE NOCASE)
);
"#;
