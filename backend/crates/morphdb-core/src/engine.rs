//! DynamicSchemaEngine - the entry point for schema and row operations
//!
//! Every operation opens its own unit of work, re-derives the table's
//! descriptor from the catalog, and releases everything when it returns.

use crate::catalog::SchemaCatalog;
use crate::descriptor::{ModelDescriptor, ModelDescriptorBuilder};
use crate::error::{MorphDbError, Result};
use crate::migrator::SchemaMigrator;
use crate::reconcile::ReconciliationReport;
use crate::row_store::{GenericRowStore, RowScan};
use crate::schema_locks::SchemaLocks;
use crate::type_registry::TypeRegistry;
use crate::validation::{same_column, validate_external_name, validate_field_name};
use morphdb_commons::{
    Field, FieldType, FieldValue, InternalName, RowId, Table, TableId, TableInfo,
};
use morphdb_configs::MorphDbConfig;
use morphdb_store::SqliteBackend;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Validated input for table creation: display name plus `name -> type tag`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTableRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl CreateTableRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            fields: BTreeMap::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        self.fields.insert(name.into(), type_tag.into());
        self
    }
}

pub struct DynamicSchemaEngine {
    backend: SqliteBackend,
    registry: Arc<TypeRegistry>,
    catalog: SchemaCatalog,
    migrator: SchemaMigrator,
    row_store: GenericRowStore,
    locks: SchemaLocks,
    max_name_length: usize,
}

impl DynamicSchemaEngine {
    /// Open the database named in `config`, building the type registry from the
    /// `[schema]` section.
    pub fn open(config: &MorphDbConfig) -> Result<Self> {
        let backend = SqliteBackend::from_settings(&config.storage)?;
        let registry = Arc::new(TypeRegistry::from_settings(&config.schema));
        Self::new(backend, registry, config)
    }

    /// Build an engine over `backend` with an explicitly provided registry and
    /// make sure the catalog relations exist.
    pub fn new(
        backend: SqliteBackend,
        registry: Arc<TypeRegistry>,
        config: &MorphDbConfig,
    ) -> Result<Self> {
        backend.initialize()?;

        let catalog = SchemaCatalog::new(config.schema.table_prefix.as_str());
        backend.write(|tx| catalog.bootstrap(tx))?;

        log::info!(
            "Dynamic schema engine ready (database: {}, types: [{}])",
            backend.path().display(),
            registry.supported_tags().join(", ")
        );

        Ok(Self {
            backend,
            registry,
            catalog,
            migrator: SchemaMigrator::new(),
            row_store: GenericRowStore::new(config.rows.scan_batch_size),
            locks: SchemaLocks::new(),
            max_name_length: config.schema.max_name_length,
        })
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    pub fn backend(&self) -> &SqliteBackend {
        &self.backend
    }

    fn descriptors(&self) -> ModelDescriptorBuilder<'_> {
        ModelDescriptorBuilder::new(&self.catalog, &self.registry)
    }

    // ------------------------------------------------------------------
    // Schema mutations
    // ------------------------------------------------------------------

    /// Create a logical table with its initial fields and its physical table.
    ///
    /// The internal name is allocated and committed first. The catalog rows and
    /// the `CREATE TABLE` then run in a single transaction; if any step fails
    /// nothing becomes visible and the allocated name is not reused, so a retry
    /// gets a fresh one.
    pub fn create_table(&self, request: &CreateTableRequest) -> Result<TableInfo> {
        log::info!(
            "🔨 CREATE TABLE request: name={:?}, fields={}",
            request.name,
            request.fields.len()
        );

        let fields = self.resolve_new_fields(&request.fields)?;
        if let Some(name) = &request.name {
            validate_external_name(name, self.max_name_length)?;
        }

        let result = self
            .backend
            .write(|tx| self.catalog.allocate_internal_name(tx))
            .and_then(|internal_name| self.register_table(internal_name, request, &fields));

        match &result {
            Ok(info) => log::info!(
                "✅ CREATE TABLE succeeded: id={}, internal_name={}, fields={}",
                info.table.id,
                info.table.internal_name,
                info.fields.len()
            ),
            Err(e) => log::warn!("❌ CREATE TABLE failed: {}", e),
        }
        result
    }

    /// Catalog rows and physical table for an already allocated internal name.
    fn register_table(
        &self,
        internal_name: InternalName,
        request: &CreateTableRequest,
        fields: &[(String, FieldType)],
    ) -> Result<TableInfo> {
        self.backend.write(|tx| -> Result<TableInfo> {
            let table = self
                .catalog
                .create_table(tx, internal_name, request.name.as_deref())?;
            let created = self.catalog.create_fields(tx, &table, fields)?;
            let descriptor = self.descriptors().build(tx, &table)?;
            self.migrator.create_physical_table(tx, &table, &descriptor)?;
            Ok(TableInfo {
                table,
                fields: created,
            })
        })
    }

    /// Add one field to an existing table.
    ///
    /// The physical column is added before the field is registered, both inside
    /// one transaction and under the table's schema lock.
    pub fn add_field(&self, table_id: TableId, name: &str, type_tag: &str) -> Result<Field> {
        log::info!(
            "🔧 ADD FIELD request: table={}, field={}, type={}",
            table_id,
            name,
            type_tag
        );

        validate_field_name(name, self.max_name_length)?;
        let template = self.registry.resolve(type_tag)?;

        let lock = self.locks.for_table(table_id);
        let _guard = lock.lock();

        let result = self.backend.write(|tx| {
            let table = self.catalog.get_table(tx, table_id)?;
            let descriptor = self.descriptors().build(tx, &table)?;
            if descriptor.column_names().any(|c| same_column(c, name)) {
                return Err(MorphDbError::DuplicateField {
                    table_id,
                    field: name.to_string(),
                });
            }

            self.migrator
                .add_physical_column(tx, &table, &template.to_column(name))?;
            self.catalog.add_field(tx, &table, name, template.field_type)
        });

        match &result {
            Ok(field) => log::info!(
                "✅ ADD FIELD succeeded: table={}, field={} ({})",
                table_id,
                field.name,
                field.field_type
            ),
            Err(e) => log::warn!("❌ ADD FIELD failed: table={}: {}", table_id, e),
        }
        result
    }

    /// Add every field of `fields` the table does not have yet.
    ///
    /// Names already present are skipped. Each addition is its own unit; the
    /// first error stops processing and earlier additions stay in place.
    pub fn add_fields(
        &self,
        table_id: TableId,
        fields: &BTreeMap<String, String>,
    ) -> Result<TableInfo> {
        let current = self.get_fields(table_id)?;

        for (name, type_tag) in fields {
            if current.contains_key(name) {
                log::debug!("Field '{}' already on table {}, skipping", name, table_id);
                continue;
            }
            self.add_field(table_id, name, type_tag)?;
        }

        self.table_info(table_id)
    }

    /// Validate names and resolve types of a create request before any write.
    fn resolve_new_fields(&self, fields: &BTreeMap<String, String>) -> Result<Vec<(String, FieldType)>> {
        let mut resolved: Vec<(String, FieldType)> = Vec::with_capacity(fields.len());
        for (name, type_tag) in fields {
            validate_field_name(name, self.max_name_length)?;
            let template = self.registry.resolve(type_tag)?;
            if resolved.iter().any(|(existing, _)| same_column(existing, name)) {
                return Err(MorphDbError::InvalidName(format!(
                    "field names '{}' collide (names are case-insensitive)",
                    name
                )));
            }
            resolved.push((name.clone(), template.field_type));
        }
        Ok(resolved)
    }

    // ------------------------------------------------------------------
    // Metadata reads
    // ------------------------------------------------------------------

    pub fn get_table(&self, table_id: TableId) -> Result<Table> {
        self.backend.read(|conn| self.catalog.get_table(conn, table_id))
    }

    pub fn list_tables(&self) -> Result<Vec<Table>> {
        self.backend.read(|conn| self.catalog.list_tables(conn))
    }

    /// Current field set as `name -> type`.
    pub fn get_fields(&self, table_id: TableId) -> Result<HashMap<String, FieldType>> {
        self.backend.read(|conn| {
            let table = self.catalog.get_table(conn, table_id)?;
            self.catalog.get_fields(conn, &table)
        })
    }

    /// Table metadata plus fields in registration order.
    pub fn table_info(&self, table_id: TableId) -> Result<TableInfo> {
        self.backend.read(|conn| {
            let table = self.catalog.get_table(conn, table_id)?;
            let fields = self.catalog.list_fields(conn, &table)?;
            Ok(TableInfo { table, fields })
        })
    }

    /// Descriptor as it stands right now. Not meant to be held on to.
    pub fn describe(&self, table_id: TableId) -> Result<ModelDescriptor> {
        self.backend.read(|conn| {
            let table = self.catalog.get_table(conn, table_id)?;
            self.descriptors().build(conn, &table)
        })
    }

    // ------------------------------------------------------------------
    // Rows
    // ------------------------------------------------------------------

    /// Insert one row. Descriptor derivation and the write share a transaction.
    pub fn insert_row(
        &self,
        table_id: TableId,
        row: &BTreeMap<String, FieldValue>,
    ) -> Result<RowId> {
        let result = self.backend.write(|tx| {
            let table = self.catalog.get_table(tx, table_id)?;
            let descriptor = self.descriptors().build(tx, &table)?;
            self.row_store.insert(tx, &descriptor, row)
        });

        if let Err(e) = &result {
            log::warn!("❌ INSERT into table {} rejected: {}", table_id, e);
        }
        result
    }

    /// Lazily list every row of the table in primary-key order.
    pub fn list_rows(&self, table_id: TableId) -> Result<RowScan> {
        let descriptor = self.describe(table_id)?;
        Ok(self.row_store.scan(self.backend.clone(), descriptor))
    }

    // ------------------------------------------------------------------
    // Maintenance
    // ------------------------------------------------------------------

    /// Compare the catalog's fields for `table_id` against the physical columns.
    pub fn reconcile(&self, table_id: TableId) -> Result<ReconciliationReport> {
        let report = self.backend.read(|conn| {
            let table = self.catalog.get_table(conn, table_id)?;
            self.reconcile_table(conn, &table)
        })?;
        log_report(&report);
        Ok(report)
    }

    /// Reconcile every table in the catalog.
    pub fn reconcile_all(&self) -> Result<Vec<ReconciliationReport>> {
        let reports = self.backend.read(|conn| {
            self.catalog
                .list_tables(conn)?
                .iter()
                .map(|table| self.reconcile_table(conn, table))
                .collect::<Result<Vec<_>>>()
        })?;
        reports.iter().for_each(log_report);
        Ok(reports)
    }

    fn reconcile_table(
        &self,
        conn: &rusqlite::Connection,
        table: &Table,
    ) -> Result<ReconciliationReport> {
        let descriptor = self.descriptors().build(conn, table)?;
        let physical = self.migrator.physical_columns(conn, table)?;
        Ok(ReconciliationReport::compare(&descriptor, &physical))
    }
}

fn log_report(report: &ReconciliationReport) {
    if report.is_consistent() {
        log::debug!("Table {} ({}) is consistent", report.table_id, report.internal_name);
    } else {
        log::warn!(
            "⚠️  Table {} ({}) out of sync: physical_table_missing={}, missing={:?}, orphaned={:?}, type_mismatches={}",
            report.table_id,
            report.internal_name,
            report.physical_table_missing,
            report.missing_columns,
            report.orphaned_columns,
            report.type_mismatches.len()
        );
    }
}
