//! # morphdb-store
//!
//! Relational backing store for MorphDB. This crate isolates every direct SQLite
//! interaction so that `morphdb-core` only deals in catalog and descriptor terms.
//!
//! ## Architecture
//!
//! ```text
//! morphdb-core (catalog, migrator, row store)
//!     ↓
//! morphdb-store (connections, transactions, value conversion)
//!     ↓
//! SQLite (rusqlite)
//! ```
//!
//! A connection is opened per unit of work and dropped afterwards; nothing is
//! cached between calls.

pub mod error;
pub mod introspection;
pub mod sql;
pub mod sqlite_backend;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod value;

pub use error::{Result, StoreError};
pub use introspection::PhysicalColumn;
pub use sqlite_backend::{JournalMode, SqliteBackend};

