// Default value functions

pub fn default_database_path() -> String {
    "./data/morphdb.sqlite".to_string() // Normalized to absolute at runtime
}

pub fn default_busy_timeout_ms() -> u64 {
    5000
}

pub fn default_journal_mode() -> String {
    "wal".to_string()
}

pub fn default_table_prefix() -> String {
    "dynamic_table".to_string()
}

pub fn default_max_name_length() -> usize {
    255
}

pub fn default_string_max_length() -> u32 {
    255
}

pub fn default_scan_batch_size() -> usize {
    500
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_logs_path() -> String {
    "./logs".to_string()
}

pub fn default_log_format() -> String {
    "compact".to_string()
}

pub fn default_true() -> bool {
    true
}
