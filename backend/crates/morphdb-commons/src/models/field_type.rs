//! FieldType - the closed set of types a dynamic field may declare
//!
//! Each variant has a stable text tag used on the wire and in the catalog:
//! - STRING = "str"
//! - INTEGER = "int"
//! - FLOAT = "float"
//! - BOOLEAN = "bool"
//!
//! Adding a type means adding a variant here and a registry entry in
//! `morphdb-core`; nothing else keys off the variant list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldType {
    /// Bounded-width UTF-8 text ("str")
    #[serde(rename = "str")]
    String,

    /// Signed integer ("int")
    #[serde(rename = "int")]
    Integer,

    /// 64-bit floating point ("float")
    #[serde(rename = "float")]
    Float,

    /// Boolean ("bool")
    #[serde(rename = "bool")]
    Boolean,
}

/// Returned when a type tag is not one of the supported tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldType(pub String);

impl fmt::Display for UnknownFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Field type '{}' is not supported. Supported types: [{}]",
            self.0,
            FieldType::all()
                .iter()
                .map(|t| t.tag())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for UnknownFieldType {}

impl FieldType {
    /// All supported types in declaration order.
    pub const fn all() -> &'static [FieldType] {
        &[
            FieldType::String,
            FieldType::Integer,
            FieldType::Float,
            FieldType::Boolean,
        ]
    }

    /// Wire/catalog tag for this type
    pub const fn tag(&self) -> &'static str {
        match self {
            FieldType::String => "str",
            FieldType::Integer => "int",
            FieldType::Float => "float",
            FieldType::Boolean => "bool",
        }
    }

    /// Parse a wire/catalog tag. Tags are matched exactly.
    pub fn from_tag(tag: &str) -> Result<Self, UnknownFieldType> {
        match tag {
            "str" => Ok(FieldType::String),
            "int" => Ok(FieldType::Integer),
            "float" => Ok(FieldType::Float),
            "bool" => Ok(FieldType::Boolean),
            other => Err(UnknownFieldType(other.to_string())),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}
