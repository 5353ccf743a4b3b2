//! Logical table metadata as stored in the catalog.

mod field;
mod table;

pub use field::Field;
pub use table::{Table, TableInfo};
