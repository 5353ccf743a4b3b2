use crate::models::ids::{InternalName, TableId};
use crate::models::schemas::Field;
use serde::{Deserialize, Serialize};

/// A logical table registered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,

    /// Caller-facing display name. Optional and not unique.
    pub external_name: Option<String>,

    /// Physical relation name. Unique and immutable once assigned.
    pub internal_name: InternalName,

    /// Creation time (unix millis)
    pub created_at: i64,
}

/// Table metadata together with its current field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub table: Table,
    pub fields: Vec<Field>,
}

impl TableInfo {
    /// Looks up a field by exact name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
