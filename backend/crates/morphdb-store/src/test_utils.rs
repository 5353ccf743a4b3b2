//! Test utilities for morphdb-store.
//!
//! Provides helpers for setting up throwaway databases with minimal boilerplate.

use crate::error::Result;
use crate::sqlite_backend::{JournalMode, SqliteBackend};
use std::time::Duration;
use tempfile::TempDir;

/// Test database wrapper that automatically cleans up on drop.
pub struct TestDb {
    pub backend: SqliteBackend,
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
}

impl TestDb {
    /// Create an initialized WAL database in a fresh temporary directory.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let backend = SqliteBackend::new(
            temp_dir.path().join("morphdb-test.sqlite"),
            Duration::from_secs(10),
            JournalMode::Wal,
        );
        backend.initialize()?;
        Ok(Self { backend, temp_dir })
    }
}
