//! Catalog vs physical schema comparison.
//!
//! A crash between `ADD COLUMN` and field registration, or outside tampering,
//! can leave the two out of step. This module only reports; it never repairs.

use crate::descriptor::ModelDescriptor;
use crate::validation::same_column;
use morphdb_commons::{InternalName, TableId, PRIMARY_KEY_COLUMN};
use morphdb_store::PhysicalColumn;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnTypeMismatch {
    pub column: String,
    pub expected: String,
    pub actual: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationReport {
    pub table_id: TableId,
    pub internal_name: InternalName,
    pub physical_table_missing: bool,
    /// Registered fields with no physical column
    pub missing_columns: Vec<String>,
    /// Physical columns no field refers to
    pub orphaned_columns: Vec<String>,
    pub type_mismatches: Vec<ColumnTypeMismatch>,
}

impl ReconciliationReport {
    pub fn is_consistent(&self) -> bool {
        !self.physical_table_missing
            && self.missing_columns.is_empty()
            && self.orphaned_columns.is_empty()
            && self.type_mismatches.is_empty()
    }

    /// Compare the catalog-derived descriptor with the columns the store reports.
    ///
    /// An empty `physical` list means the physical table does not exist.
    pub fn compare(descriptor: &ModelDescriptor, physical: &[PhysicalColumn]) -> Self {
        let physical_table_missing = physical.is_empty();
        let physical_fields: Vec<&PhysicalColumn> = physical
            .iter()
            .filter(|c| !same_column(&c.name, PRIMARY_KEY_COLUMN))
            .collect();

        let mut missing_columns = Vec::new();
        let mut type_mismatches = Vec::new();
        for spec in &descriptor.columns {
            match physical_fields.iter().find(|c| same_column(&c.name, &spec.name)) {
                None => missing_columns.push(spec.name.clone()),
                Some(column) => {
                    let expected = spec.physical_type.sql_name();
                    if !column.declared_type.eq_ignore_ascii_case(&expected) {
                        type_mismatches.push(ColumnTypeMismatch {
                            column: spec.name.clone(),
                            expected,
                            actual: column.declared_type.clone(),
                        });
                    }
                }
            }
        }

        let orphaned_columns = physical_fields
            .iter()
            .filter(|c| !descriptor.columns.iter().any(|s| same_column(&s.name, &c.name)))
            .map(|c| c.name.clone())
            .collect();

        Self {
            table_id: descriptor.table_id,
            internal_name: descriptor.internal_name.clone(),
            physical_table_missing,
            missing_columns,
            orphaned_columns,
            type_mismatches,
        }
    }
}
