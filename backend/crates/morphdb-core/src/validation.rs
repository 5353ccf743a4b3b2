//! Name checks applied before any catalog or physical write.

use crate::error::{MorphDbError, Result};
use morphdb_commons::PRIMARY_KEY_COLUMN;

/// Field names become physical column names: non-empty, bounded, no NUL, and
/// never the implicit primary key.
pub fn validate_field_name(name: &str, max_length: usize) -> Result<()> {
    if name.trim().is_empty() {
        return Err(MorphDbError::InvalidName(
            "field name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > max_length {
        return Err(MorphDbError::InvalidName(format!(
            "field name '{}' exceeds {} characters",
            name, max_length
        )));
    }
    if name.contains('\0') {
        return Err(MorphDbError::InvalidName(
            "field name cannot contain NUL characters".to_string(),
        ));
    }
    if name.eq_ignore_ascii_case(PRIMARY_KEY_COLUMN) {
        return Err(MorphDbError::InvalidName(format!(
            "'{}' is reserved for the primary key",
            name
        )));
    }
    Ok(())
}

pub fn validate_external_name(name: &str, max_length: usize) -> Result<()> {
    if name.chars().count() > max_length {
        return Err(MorphDbError::InvalidName(format!(
            "table name exceeds {} characters",
            max_length
        )));
    }
    Ok(())
}

/// Physical column names compare ASCII case-insensitively.
pub fn same_column(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
