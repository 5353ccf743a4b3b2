//! SQLite implementation of the MorphDB backing store.
//!
//! The backend only remembers where the database lives and how to configure a
//! connection. Each call to [`SqliteBackend::read`] or [`SqliteBackend::write`]
//! opens a fresh connection, runs the closure, and drops it again.

use crate::error::{Result, StoreError};
use morphdb_configs::StorageSettings;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// SQLite journal mode applied when the database is initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
    Wal,
    Delete,
    Truncate,
}

impl JournalMode {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "wal" => Ok(JournalMode::Wal),
            "delete" => Ok(JournalMode::Delete),
            "truncate" => Ok(JournalMode::Truncate),
            other => Err(StoreError::InvalidConfig(format!(
                "unknown journal mode '{}'",
                other
            ))),
        }
    }

    pub fn as_pragma(&self) -> &'static str {
        match self {
            JournalMode::Wal => "WAL",
            JournalMode::Delete => "DELETE",
            JournalMode::Truncate => "TRUNCATE",
        }
    }
}

/// Handle to the SQLite database that holds the catalog and all dynamic tables.
///
/// Cheap to clone; holds no open connection.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    path: PathBuf,
    busy_timeout: Duration,
    journal_mode: JournalMode,
}

impl SqliteBackend {
    pub fn new(path: impl Into<PathBuf>, busy_timeout: Duration, journal_mode: JournalMode) -> Self {
        Self {
            path: path.into(),
            busy_timeout,
            journal_mode,
        }
    }

    /// Build a backend from the `[storage]` config section.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self> {
        Ok(Self::new(
            &settings.database_path,
            Duration::from_millis(settings.busy_timeout_ms),
            JournalMode::parse(&settings.journal_mode)?,
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and apply the journal mode.
    ///
    /// Idempotent; call once at startup before concurrent use.
    pub fn initialize(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = self.connect()?;
        let mode: String = conn.pragma_update_and_check(
            None,
            "journal_mode",
            self.journal_mode.as_pragma(),
            |row| row.get(0),
        )?;

        log::debug!(
            "SQLite backend initialized at {} (journal_mode={})",
            self.path.display(),
            mode
        );
        Ok(())
    }

    /// Open a new connection configured with the busy timeout and foreign keys.
    pub fn connect(&self) -> Result<Connection> {
        let path_str = self
            .path
            .to_str()
            .ok_or_else(|| StoreError::InvalidPath(self.path.display().to_string()))?;
        if path_str.is_empty() || path_str == ":memory:" {
            return Err(StoreError::InvalidPath(path_str.to_string()));
        }

        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(self.busy_timeout)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(conn)
    }

    /// Run `f` against a fresh connection outside any explicit transaction.
    pub fn read<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&Connection) -> std::result::Result<T, E>,
        E: From<StoreError>,
    {
        let conn = self.connect()?;
        f(&conn)
    }

    /// Run `f` inside an IMMEDIATE transaction on a fresh connection.
    ///
    /// The transaction commits only when `f` returns `Ok`; any error (or panic)
    /// drops it, which rolls back every statement `f` issued, DDL included.
    pub fn write<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&Transaction<'_>) -> std::result::Result<T, E>,
        E: From<StoreError>,
    {
        let mut conn = self.connect()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(StoreError::from)?;
        let value = f(&tx)?;
        tx.commit().map_err(StoreError::from)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn backend(dir: &TempDir) -> SqliteBackend {
        let backend = SqliteBackend::new(
            dir.path().join("nested").join("test.sqlite"),
            Duration::from_secs(5),
            JournalMode::Wal,
        );
        backend.initialize().unwrap();
        backend
    }

    #[test]
    fn test_initialize_creates_parent_dir() {
        let dir = TempDir::new().unwrap();
        let backend = backend(&dir);
        assert!(backend.path().parent().unwrap().exists());
    }

    #[test]
    fn test_write_commits_on_ok() {
        let dir = TempDir::new().unwrap();
        let backend = backend(&dir);

        backend
            .write(|tx| -> Result<()> {
                tx.execute_batch("CREATE TABLE t (x INTEGER); INSERT INTO t VALUES (1);")?;
                Ok(())
            })
            .unwrap();

        let count: i64 = backend
            .read(|conn| -> Result<i64> {
                Ok(conn.query_row("SELECT COUNT(*) FROM t", [], |r| r.get(0))?)
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_write_rolls_back_ddl_on_err() {
        let dir = TempDir::new().unwrap();
        let backend = backend(&dir);

        let result = backend.write(|tx| -> Result<()> {
            tx.execute_batch("CREATE TABLE doomed (x INTEGER)")?;
            Err(StoreError::InvalidConfig("forced failure".to_string()))
        });
        assert!(result.is_err());

        let exists: i64 = backend
            .read(|conn| -> Result<i64> {
                Ok(conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'doomed'",
                    [],
                    |r| r.get(0),
                )?)
            })
            .unwrap();
        assert_eq!(exists, 0);
    }

    #[test]
    fn test_memory_path_rejected() {
        let backend = SqliteBackend::new(":memory:", Duration::from_secs(1), JournalMode::Delete);
        assert!(matches!(backend.connect(), Err(StoreError::InvalidPath(_))));
    }

    #[test]
    fn test_journal_mode_parse() {
        assert_eq!(JournalMode::parse("WAL").unwrap(), JournalMode::Wal);
        assert!(JournalMode::parse("memory").is_err());
    }
}
