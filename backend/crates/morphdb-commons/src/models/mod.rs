pub mod field_type;
pub mod field_value;
pub mod ids;
pub mod row;
pub mod schemas;
