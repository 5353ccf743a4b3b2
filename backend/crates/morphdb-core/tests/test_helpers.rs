//! Test helpers for building a DynamicSchemaEngine on a throwaway database.

#![allow(dead_code)]

use morphdb_configs::MorphDbConfig;
use morphdb_core::{DynamicSchemaEngine, TypeRegistry};
use morphdb_store::test_utils::TestDb;
use std::sync::Arc;

/// Engine plus the temporary database backing it.
pub struct TestEngine {
    pub engine: DynamicSchemaEngine,
    pub db: TestDb,
}

impl TestEngine {
    pub fn new() -> Self {
        Self::with_config(MorphDbConfig::default())
    }

    pub fn with_config(config: MorphDbConfig) -> Self {
        let db = TestDb::new().expect("Failed to create test database");
        let registry = Arc::new(TypeRegistry::from_settings(&config.schema));
        let engine = DynamicSchemaEngine::new(db.backend.clone(), registry, &config)
            .expect("Failed to create engine");
        Self { engine, db }
    }

    /// A second engine over the same database file, as another process would see it.
    pub fn reopen(&self) -> DynamicSchemaEngine {
        let config = MorphDbConfig::default();
        let registry = Arc::new(TypeRegistry::from_settings(&config.schema));
        DynamicSchemaEngine::new(self.db.backend.clone(), registry, &config)
            .expect("Failed to reopen engine")
    }
}

#[macro_export]
macro_rules! row {
    ($($name:expr => $value:expr),* $(,)?) => {{
        let mut map = std::collections::BTreeMap::<String, morphdb_commons::FieldValue>::new();
        $( map.insert($name.to_string(), morphdb_commons::FieldValue::from($value)); )*
        map
    }};
}
