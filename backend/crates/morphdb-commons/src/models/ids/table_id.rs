//! Surrogate key of a logical table in the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog id of a logical table (`tables.id`).
///
/// Ensures table ids cannot be accidentally used where row ids are expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(i64);

impl TableId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TableId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for TableId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}
