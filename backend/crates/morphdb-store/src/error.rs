use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by the backing store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid database path: {0}")]
    InvalidPath(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unexpected value in column '{column}': {detail}")]
    UnexpectedValue { column: String, detail: String },
}
