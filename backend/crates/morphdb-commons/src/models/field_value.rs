//! Generic cell value exchanged with callers.

use crate::models::field_type::FieldType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell of a dynamic row.
///
/// Serializes to plain JSON scalars (`null`, `true`, `42`, `3.14`, `"x"`).
/// Deserialization tries the variants in declaration order, so integral JSON
/// numbers become `Integer` and everything else numeric becomes `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl FieldValue {
    /// Whether this value may be stored in a field declared as `ty`.
    ///
    /// `Null` fits every type and integers widen into `Float` fields.
    pub fn fits(&self, ty: FieldType) -> bool {
        matches!(
            (self, ty),
            (FieldValue::Null, _)
                | (FieldValue::String(_), FieldType::String)
                | (FieldValue::Integer(_), FieldType::Integer)
                | (FieldValue::Integer(_), FieldType::Float)
                | (FieldValue::Float(_), FieldType::Float)
                | (FieldValue::Boolean(_), FieldType::Boolean)
        )
    }

    /// Short kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Boolean(_) => "bool",
            FieldValue::Integer(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::String(_) => "str",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Boolean(v) => write!(f, "{}", v),
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::String(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::String(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Boolean(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}
