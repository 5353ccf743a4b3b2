//! Type-safe identifiers.

mod internal_name;
mod row_id;
mod table_id;

pub use internal_name::InternalName;
pub use row_id::RowId;
pub use table_id::TableId;
