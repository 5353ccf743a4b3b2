// Error types module
use morphdb_commons::{FieldType, TableId};
use morphdb_store::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MorphDbError>;

/// Main error type for the dynamic schema engine
#[derive(Error, Debug)]
pub enum MorphDbError {
    #[error("{0}")]
    UnknownType(String),

    #[error("Field '{field}' already exists on table {table_id}")]
    DuplicateField { table_id: TableId, field: String },

    #[error("Table with id: {0} does not exist.")]
    TableNotFound(TableId),

    #[error("Unknown field '{field}' for table {table_id}")]
    UnknownField { table_id: TableId, field: String },

    #[error("DDL failure on {target}: {reason}")]
    DdlFailure { target: String, reason: String },

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        actual: &'static str,
    },

    #[error("Value for field '{field}' is {length} characters long (max: {max})")]
    ValueTooLong {
        field: String,
        length: usize,
        max: u32,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl From<rusqlite::Error> for MorphDbError {
    fn from(e: rusqlite::Error) -> Self {
        MorphDbError::Storage(StoreError::Sqlite(e))
    }
}

impl From<morphdb_commons::UnknownFieldType> for MorphDbError {
    fn from(e: morphdb_commons::UnknownFieldType) -> Self {
        MorphDbError::UnknownType(e.to_string())
    }
}
