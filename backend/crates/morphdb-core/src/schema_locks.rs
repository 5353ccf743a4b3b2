//! Per-table serialization of schema mutations.
//!
//! Two `add_field` calls on the same table run one after the other; mutations on
//! different tables never wait on each other. There is no global schema lock.

use dashmap::DashMap;
use morphdb_commons::TableId;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct SchemaLocks {
    locks: DashMap<TableId, Arc<Mutex<()>>>,
}

impl SchemaLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock handle for `table_id`; the caller holds `handle.lock()` for the
    /// duration of the mutation.
    ///
    /// Entries are never evicted. Tables are never dropped, so the map is
    /// bounded by the number of tables mutated in this process.
    pub fn for_table(&self, table_id: TableId) -> Arc<Mutex<()>> {
        self.locks
            .entry(table_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
