//! # morphdb-commons
//!
//! Shared types used across the MorphDB crates: identifier newtypes, the closed
//! [`FieldType`] set, generic [`FieldValue`]s and the logical table metadata
//! records handed back to callers.
//!
//! This crate has no storage dependency so that the store, the engine and any
//! outer surface can all speak the same vocabulary.

pub mod models;

pub use models::field_type::{FieldType, UnknownFieldType};
pub use models::field_value::FieldValue;
pub use models::ids::{InternalName, RowId, TableId};
pub use models::row::{Row, PRIMARY_KEY_COLUMN};
pub use models::schemas::{Field, Table, TableInfo};
