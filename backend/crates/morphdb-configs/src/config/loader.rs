use super::types::MorphDbConfig;
use crate::file_helpers::normalize_dir_path;
use std::fs;
use std::path::Path;

const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
const VALID_LOG_FORMATS: [&str; 2] = ["compact", "json"];
const VALID_JOURNAL_MODES: [&str; 3] = ["wal", "delete", "truncate"];

impl MorphDbConfig {
    /// Load configuration from a TOML file
    ///
    /// Note: Environment overrides are applied separately via `apply_env_overrides()`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text without touching the environment.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
    }

    /// Apply `MORPHDB_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("MORPHDB_DATABASE_PATH") {
            log::debug!("Overriding storage.database_path from MORPHDB_DATABASE_PATH");
            self.storage.database_path = path;
        }
        if let Ok(level) = std::env::var("MORPHDB_LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }
        if let Ok(path) = std::env::var("MORPHDB_LOGS_PATH") {
            self.logging.logs_path = path;
        }
    }

    fn normalize_paths(&mut self) {
        self.storage.database_path = normalize_dir_path(&self.storage.database_path);
        self.logging.logs_path = normalize_dir_path(&self.logging.logs_path);
    }

    /// Normalize local filesystem paths and validate configuration.
    ///
    /// Call this after applying environment overrides.
    pub fn finalize(&mut self) -> anyhow::Result<()> {
        // Reject in-memory databases before normalization turns them into a file name
        self.validate()?;
        self.normalize_paths();
        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        let db_path = self.storage.database_path.trim();
        if db_path.is_empty() || db_path == ":memory:" || db_path.starts_with("file::memory:") {
            return Err(anyhow::anyhow!(
                "storage.database_path must point to a database file (got '{}')",
                self.storage.database_path
            ));
        }

        if self.storage.busy_timeout_ms == 0 {
            return Err(anyhow::anyhow!("storage.busy_timeout_ms cannot be 0"));
        }

        let journal_mode = self.storage.journal_mode.to_lowercase();
        if !VALID_JOURNAL_MODES.contains(&journal_mode.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid journal mode '{}'. Must be one of: {}",
                self.storage.journal_mode,
                VALID_JOURNAL_MODES.join(", ")
            ));
        }

        let prefix = &self.schema.table_prefix;
        if prefix.is_empty()
            || prefix.starts_with(|c: char| c.is_ascii_digit())
            || !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(anyhow::anyhow!(
                "schema.table_prefix '{}' must be a non-empty identifier ([A-Za-z_][A-Za-z0-9_]*)",
                prefix
            ));
        }

        if self.schema.max_name_length == 0 {
            return Err(anyhow::anyhow!("schema.max_name_length cannot be 0"));
        }

        if self.schema.string_max_length == 0 {
            return Err(anyhow::anyhow!("schema.string_max_length cannot be 0"));
        }

        if self.rows.scan_batch_size == 0 {
            return Err(anyhow::anyhow!("rows.scan_batch_size cannot be 0"));
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                VALID_LOG_LEVELS.join(", ")
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                VALID_LOG_FORMATS.join(", ")
            ));
        }

        for (target, level) in &self.logging.targets {
            if !VALID_LOG_LEVELS.contains(&level.as_str()) {
                return Err(anyhow::anyhow!(
                    "Invalid log level '{}' for target '{}'. Must be one of: {}",
                    level,
                    target,
                    VALID_LOG_LEVELS.join(", ")
                ));
            }
        }

        Ok(())
    }
}
