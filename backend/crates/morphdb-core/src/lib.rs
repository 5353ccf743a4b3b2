//! # morphdb-core
//!
//! The dynamic schema engine. Callers declare a logical table as a set of named,
//! typed fields at runtime and can immediately insert and list rows against it.
//!
//! ## Components
//!
//! ```text
//! DynamicSchemaEngine (facade, per-table schema locks)
//!   ├─ SchemaCatalog          tables / fields metadata, identifier allocation
//!   ├─ TypeRegistry           FieldType -> physical column template
//!   ├─ ModelDescriptorBuilder catalog state -> ordered ColumnSpec list
//!   ├─ SchemaMigrator         CREATE TABLE / ALTER TABLE ADD COLUMN
//!   └─ GenericRowStore        insert / lazy list against a descriptor
//! ```
//!
//! Descriptors are rebuilt from the catalog on every operation and never cached.

pub mod catalog;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod migrator;
pub mod reconcile;
pub mod row_store;
pub mod schema_locks;
pub mod type_registry;
pub mod validation;

pub use catalog::SchemaCatalog;
pub use descriptor::{ColumnSpec, ModelDescriptor, ModelDescriptorBuilder};
pub use engine::{CreateTableRequest, DynamicSchemaEngine};
pub use error::{MorphDbError, Result};
pub use migrator::SchemaMigrator;
pub use reconcile::{ColumnTypeMismatch, ReconciliationReport};
pub use row_store::{GenericRowStore, RowScan};
pub use type_registry::{ColumnSpecTemplate, PhysicalType, TypeRegistry};
