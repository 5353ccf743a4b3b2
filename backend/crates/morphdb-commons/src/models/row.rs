use crate::models::field_value::FieldValue;
use crate::models::ids::RowId;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Name of the implicit primary key column of every dynamic table.
pub const PRIMARY_KEY_COLUMN: &str = "id";

/// One row read back from a dynamic table.
///
/// `values` follows the column order of the descriptor the row was read with.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: RowId,
    pub values: Vec<(String, FieldValue)>,
}

impl Row {
    pub fn new(id: RowId, values: Vec<(String, FieldValue)>) -> Self {
        Self { id, values }
    }

    /// Helper to retrieve a value by column name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }
}

// Serializes as a flat JSON object: `{"id": 1, "a": "x", ...}` in column order.
impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry(PRIMARY_KEY_COLUMN, &self.id)?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
