//! Physical identifier binding a logical table to its backing relation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the physical relation backing a logical table, e.g. `dynamic_table_12`.
///
/// Assigned once at creation from a store-allocated sequence number and never
/// changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InternalName(String);

impl InternalName {
    /// Builds the name for sequence number `seq` under `prefix`.
    pub fn from_sequence(prefix: &str, seq: i64) -> Self {
        Self(format!("{}_{}", prefix, seq))
    }

    /// Wraps a name read back from the catalog.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InternalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for InternalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
