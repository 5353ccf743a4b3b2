//! morphdb-configs
//!
//! Configuration types and loader for MorphDB.

pub mod config;
pub mod file_helpers;

pub use config::*;
pub use config::defaults;
