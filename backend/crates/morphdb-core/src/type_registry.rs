//! TypeRegistry - maps field type tags to physical column templates
//!
//! Built once at startup and handed to every component that needs it as an
//! explicit `Arc<TypeRegistry>`. There is no process-wide instance.

use crate::descriptor::ColumnSpec;
use crate::error::{MorphDbError, Result};
use morphdb_commons::FieldType;
use morphdb_configs::SchemaSettings;
use std::collections::HashMap;
use std::fmt;

/// Physical column type in the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalType {
    /// Bounded-width text
    Varchar(u32),
    Integer,
    Real,
    Boolean,
}

impl PhysicalType {
    /// Type name as written in DDL
    pub fn sql_name(&self) -> String {
        match self {
            PhysicalType::Varchar(width) => format!("VARCHAR({})", width),
            PhysicalType::Integer => "INTEGER".to_string(),
            PhysicalType::Real => "REAL".to_string(),
            PhysicalType::Boolean => "BOOLEAN".to_string(),
        }
    }

    /// Maximum character length for text columns.
    pub fn max_length(&self) -> Option<u32> {
        match self {
            PhysicalType::Varchar(width) => Some(*width),
            _ => None,
        }
    }
}

impl fmt::Display for PhysicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql_name())
    }
}

/// What a field type resolves to, before a column name is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpecTemplate {
    pub field_type: FieldType,
    pub physical_type: PhysicalType,
    pub nullable: bool,
}

impl ColumnSpecTemplate {
    /// Attach a column name.
    pub fn to_column(&self, name: impl Into<String>) -> ColumnSpec {
        ColumnSpec {
            name: name.into(),
            field_type: self.field_type,
            physical_type: self.physical_type,
            nullable: self.nullable,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypeRegistry {
    entries: HashMap<FieldType, ColumnSpecTemplate>,
}

impl TypeRegistry {
    /// Registry with every built-in type registered. `str` maps to a text
    /// column of `string_max_length` characters.
    pub fn new(string_max_length: u32) -> Self {
        let mut registry = Self::empty();
        registry.register(FieldType::String, PhysicalType::Varchar(string_max_length));
        registry.register(FieldType::Integer, PhysicalType::Integer);
        registry.register(FieldType::Float, PhysicalType::Real);
        registry.register(FieldType::Boolean, PhysicalType::Boolean);
        registry
    }

    pub fn from_settings(settings: &SchemaSettings) -> Self {
        Self::new(settings.string_max_length)
    }

    /// Registry with nothing registered; every resolve fails until `register`.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register (or replace) the physical mapping of `field_type`.
    ///
    /// Dynamic columns are always nullable: rows that predate a column have no
    /// value for it.
    pub fn register(&mut self, field_type: FieldType, physical_type: PhysicalType) {
        self.entries.insert(
            field_type,
            ColumnSpecTemplate {
                field_type,
                physical_type,
                nullable: true,
            },
        );
    }

    /// Resolve a wire/catalog type tag such as `"int"`.
    pub fn resolve(&self, tag: &str) -> Result<ColumnSpecTemplate> {
        let field_type = FieldType::from_tag(tag).map_err(|_| self.unknown(tag))?;
        self.resolve_type(field_type)
    }

    pub fn resolve_type(&self, field_type: FieldType) -> Result<ColumnSpecTemplate> {
        self.entries
            .get(&field_type)
            .copied()
            .ok_or_else(|| self.unknown(field_type.tag()))
    }

    /// Tags this registry can resolve, in `FieldType` declaration order.
    pub fn supported_tags(&self) -> Vec<&'static str> {
        FieldType::all()
            .iter()
            .filter(|t| self.entries.contains_key(t))
            .map(|t| t.tag())
            .collect()
    }

    fn unknown(&self, tag: &str) -> MorphDbError {
        MorphDbError::UnknownType(format!(
            "Field type: {} is not supported. Only the following types are supported: [{}]",
            tag,
            self.supported_tags().join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_builtin_types() {
        let registry = TypeRegistry::new(255);

        let string = registry.resolve("str").unwrap();
        assert_eq!(string.physical_type, PhysicalType::Varchar(255));
        assert_eq!(string.physical_type.max_length(), Some(255));

        assert_eq!(registry.resolve("int").unwrap().physical_type, PhysicalType::Integer);
        assert_eq!(registry.resolve("float").unwrap().physical_type, PhysicalType::Real);
        assert_eq!(registry.resolve("bool").unwrap().physical_type, PhysicalType::Boolean);
        assert!(FieldType::all()
            .iter()
            .all(|t| registry.resolve_type(*t).unwrap().nullable));
    }

    #[test]
    fn test_unknown_tag() {
        let registry = TypeRegistry::new(255);
        let err = registry.resolve("datetime").unwrap_err();
        assert!(matches!(err, MorphDbError::UnknownType(_)));
        assert!(err.to_string().contains("datetime"));
        assert!(err.to_string().contains("[str, int, float, bool]"));
    }

    #[test]
    fn test_unregistered_type_is_unknown() {
        let mut registry = TypeRegistry::empty();
        registry.register(FieldType::Integer, PhysicalType::Integer);

        assert!(registry.resolve("int").is_ok());
        assert!(matches!(
            registry.resolve("bool"),
            Err(MorphDbError::UnknownType(_))
        ));
        assert_eq!(registry.supported_tags(), vec!["int"]);
    }

    #[test]
    fn test_sql_names() {
        assert_eq!(PhysicalType::Varchar(64).sql_name(), "VARCHAR(64)");
        assert_eq!(PhysicalType::Real.to_string(), "REAL");
    }
}
