use crate::models::field_type::FieldType;
use crate::models::ids::TableId;
use serde::{Deserialize, Serialize};

/// A named, typed field belonging to one logical table.
///
/// `(name, table_id)` is unique. Name and type never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(skip_serializing, default = "detached_table")]
    pub table_id: TableId,
}

// Outbound field metadata omits the owning table.
fn detached_table() -> TableId {
    TableId::new(0)
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType, table_id: TableId) -> Self {
        Self {
            name: name.into(),
            field_type,
            table_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_serializes_name_and_type_only() {
        let field = Field::new("age", FieldType::Integer, TableId::new(3));
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json, serde_json::json!({"name": "age", "type": "int"}));
    }
}
