//! Model descriptors: the current shape of a logical table.
//!
//! A descriptor is derived from catalog state at the moment it is needed and
//! dropped at the end of the operation. Holding one across requests would let it
//! drift from the physical table after a field is added.

use crate::catalog::SchemaCatalog;
use crate::error::Result;
use crate::type_registry::{PhysicalType, TypeRegistry};
use morphdb_commons::{FieldType, InternalName, Table, TableId};
use morphdb_store::sql::quote_ident;
use rusqlite::Connection;

/// One physical column derived from a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub field_type: FieldType,
    pub physical_type: PhysicalType,
    pub nullable: bool,
}

impl ColumnSpec {
    /// Column definition fragment for DDL, e.g. `"title" VARCHAR(255) NULL`
    pub fn to_sql(&self) -> String {
        format!(
            "{} {} {}",
            quote_ident(&self.name),
            self.physical_type.sql_name(),
            if self.nullable { "NULL" } else { "NOT NULL" }
        )
    }
}

/// Ordered column list of one logical table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub table_id: TableId,
    pub internal_name: InternalName,
    pub columns: Vec<ColumnSpec>,
}

impl ModelDescriptor {
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

pub struct ModelDescriptorBuilder<'a> {
    catalog: &'a SchemaCatalog,
    registry: &'a TypeRegistry,
}

impl<'a> ModelDescriptorBuilder<'a> {
    pub fn new(catalog: &'a SchemaCatalog, registry: &'a TypeRegistry) -> Self {
        Self { catalog, registry }
    }

    /// Read the fields of `table` and resolve each through the registry.
    ///
    /// Columns follow field registration order, so the result is a
    /// deterministic function of catalog state.
    pub fn build(&self, conn: &Connection, table: &Table) -> Result<ModelDescriptor> {
        let fields = self.catalog.list_fields(conn, table)?;

        let columns = fields
            .iter()
            .map(|field| {
                self.registry
                    .resolve_type(field.field_type)
                    .map(|template| template.to_column(field.name.as_str()))
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Built descriptor for {} ({}): {} column(s)",
            table.id,
            table.internal_name,
            columns.len()
        );

        Ok(ModelDescriptor {
            table_id: table.id,
            internal_name: table.internal_name.clone(),
            columns,
        })
    }
}
