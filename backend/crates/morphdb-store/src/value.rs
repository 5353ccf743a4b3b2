//! Conversion between generic [`FieldValue`]s and SQLite values.

use crate::error::{Result, StoreError};
use morphdb_commons::{FieldType, FieldValue};
use rusqlite::types::{ToSql, ToSqlOutput, Value, ValueRef};

/// Borrowing adapter that binds a [`FieldValue`] as a statement parameter.
pub struct SqlValue<'a>(pub &'a FieldValue);

impl ToSql for SqlValue<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.0 {
            FieldValue::Null => ToSqlOutput::Owned(Value::Null),
            FieldValue::Boolean(v) => ToSqlOutput::Owned(Value::Integer(i64::from(*v))),
            FieldValue::Integer(v) => ToSqlOutput::Owned(Value::Integer(*v)),
            FieldValue::Float(v) => ToSqlOutput::Owned(Value::Real(*v)),
            FieldValue::String(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
        })
    }
}

/// Decode a stored value according to the column's declared field type.
pub fn read_value(column: &str, raw: ValueRef<'_>, field_type: FieldType) -> Result<FieldValue> {
    let unexpected = |detail: String| StoreError::UnexpectedValue {
        column: column.to_string(),
        detail,
    };

    match (raw, field_type) {
        (ValueRef::Null, _) => Ok(FieldValue::Null),
        (ValueRef::Text(bytes), FieldType::String) => std::str::from_utf8(bytes)
            .map(|s| FieldValue::String(s.to_string()))
            .map_err(|e| unexpected(format!("invalid UTF-8: {}", e))),
        (ValueRef::Integer(v), FieldType::Integer) => Ok(FieldValue::Integer(v)),
        (ValueRef::Integer(v), FieldType::Float) => Ok(FieldValue::Float(v as f64)),
        (ValueRef::Real(v), FieldType::Float) => Ok(FieldValue::Float(v)),
        (ValueRef::Integer(v), FieldType::Boolean) => Ok(FieldValue::Boolean(v != 0)),
        (other, ty) => Err(unexpected(format!(
            "stored {:?} cannot be read as '{}'",
            other.data_type(),
            ty
        ))),
    }
}
