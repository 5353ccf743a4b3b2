use super::defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main MorphDB configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MorphDbConfig {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub schema: SchemaSettings,
    #[serde(default)]
    pub rows: RowSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Backing store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite database file holding the catalog and every dynamic table
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// How long a statement waits on a locked database before failing (ms).
    /// Schema DDL runs under this timeout too.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// SQLite journal mode: "wal", "delete" or "truncate"
    #[serde(default = "default_journal_mode")]
    pub journal_mode: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            journal_mode: default_journal_mode(),
        }
    }
}

/// Dynamic schema settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaSettings {
    /// Prefix of physical table names (`<prefix>_<sequence>`)
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,

    /// Maximum length of field names and external table names
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,

    /// Width of the bounded text column used for "str" fields
    #[serde(default = "default_string_max_length")]
    pub string_max_length: u32,
}

impl Default for SchemaSettings {
    fn default() -> Self {
        Self {
            table_prefix: default_table_prefix(),
            max_name_length: default_max_name_length(),
            string_max_length: default_string_max_length(),
        }
    }
}

/// Row access settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowSettings {
    /// Rows fetched per page when listing a table
    #[serde(default = "default_scan_batch_size")]
    pub scan_batch_size: usize,
}

impl Default for RowSettings {
    fn default() -> Self {
        Self {
            scan_batch_size: default_scan_batch_size(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_logs_path")]
    pub logs_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    /// "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Per-target level overrides, e.g. `morphdb_core = "debug"`
    #[serde(default)]
    pub targets: HashMap<String, String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            logs_path: default_logs_path(),
            log_to_console: true,
            format: default_log_format(),
            targets: HashMap::new(),
        }
    }
}
