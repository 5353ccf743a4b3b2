//! End-to-end tests for table creation, schema evolution and row round trips.

mod test_helpers;

use morphdb_commons::{FieldType, FieldValue, RowId, TableId};
use morphdb_core::{CreateTableRequest, MorphDbError};
use std::collections::{BTreeMap, HashMap, HashSet};
use test_helpers::TestEngine;

fn people_request() -> CreateTableRequest {
    CreateTableRequest::new("people")
        .field("name", "str")
        .field("age", "int")
        .field("score", "float")
        .field("active", "bool")
}

#[test]
fn test_create_table_registers_declared_fields() {
    let t = TestEngine::new();
    let info = t.engine.create_table(&people_request()).unwrap();

    assert_eq!(info.table.external_name.as_deref(), Some("people"));
    assert_eq!(info.fields.len(), 4);

    let fields = t.engine.get_fields(info.table.id).unwrap();
    let expected: HashMap<String, FieldType> = [
        ("name", FieldType::String),
        ("age", FieldType::Integer),
        ("score", FieldType::Float),
        ("active", FieldType::Boolean),
    ]
    .into_iter()
    .map(|(n, t)| (n.to_string(), t))
    .collect();
    assert_eq!(fields, expected);
}

#[test]
fn test_create_table_builds_physical_table() {
    let t = TestEngine::new();
    let info = t.engine.create_table(&people_request()).unwrap();

    let report = t.engine.reconcile(info.table.id).unwrap();
    assert!(report.is_consistent(), "unexpected drift: {:?}", report);

    let descriptor = t.engine.describe(info.table.id).unwrap();
    let names: Vec<&str> = descriptor.column_names().collect();
    assert_eq!(names, vec!["active", "age", "name", "score"]);
    assert!(descriptor.columns.iter().all(|c| c.nullable));
}

#[test]
fn test_create_table_without_fields_or_name() {
    let t = TestEngine::new();
    let info = t.engine.create_table(&CreateTableRequest::default()).unwrap();

    assert!(info.table.external_name.is_none());
    assert!(info.fields.is_empty());
    assert!(t.engine.get_fields(info.table.id).unwrap().is_empty());

    let rows: Vec<_> = t.engine.list_rows(info.table.id).unwrap().collect();
    assert!(rows.is_empty());
}

#[test]
fn test_internal_names_are_distinct() {
    let t = TestEngine::new();
    let a = t.engine.create_table(&CreateTableRequest::new("same")).unwrap();
    let b = t.engine.create_table(&CreateTableRequest::new("same")).unwrap();

    assert_ne!(a.table.id, b.table.id);
    assert_ne!(a.table.internal_name, b.table.internal_name);
    assert!(a.table.internal_name.as_str().starts_with("dynamic_table_"));
}

#[test]
fn test_concurrent_create_table_allocates_unique_names() {
    let t = TestEngine::new();
    let threads = 8;

    let infos: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|i| {
                let engine = &t.engine;
                scope.spawn(move || {
                    engine
                        .create_table(&CreateTableRequest::new(format!("t{}", i)).field("v", "int"))
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let names: HashSet<String> = infos
        .iter()
        .map(|i| i.table.internal_name.as_str().to_string())
        .collect();
    assert_eq!(names.len(), threads);

    for report in t.engine.reconcile_all().unwrap() {
        assert!(report.is_consistent(), "unexpected drift: {:?}", report);
    }
}

#[test]
fn test_unknown_type_rejects_whole_request() {
    let t = TestEngine::new();
    let request = CreateTableRequest::new("bad")
        .field("ok", "int")
        .field("when", "datetime");

    let err = t.engine.create_table(&request).unwrap_err();
    match &err {
        MorphDbError::UnknownType(msg) => {
            assert!(msg.contains("datetime"));
            assert!(msg.contains("str"));
        }
        other => panic!("expected UnknownType, got {:?}", other),
    }
    assert!(t.engine.list_tables().unwrap().is_empty());
}

#[test]
fn test_case_insensitive_field_collision_rejected() {
    let t = TestEngine::new();
    let request = CreateTableRequest::new("dup").field("Name", "str").field("name", "str");

    let err = t.engine.create_table(&request).unwrap_err();
    assert!(matches!(err, MorphDbError::InvalidName(_)));
    assert!(t.engine.list_tables().unwrap().is_empty());
}

#[test]
fn test_reserved_id_field_rejected() {
    let t = TestEngine::new();
    let err = t
        .engine
        .create_table(&CreateTableRequest::new("x").field("id", "int"))
        .unwrap_err();
    assert!(matches!(err, MorphDbError::InvalidName(_)));
}

#[test]
fn test_add_field_to_populated_table() {
    let t = TestEngine::new();
    let info = t
        .engine
        .create_table(&CreateTableRequest::new("evolve").field("a", "str"))
        .unwrap();
    let id = info.table.id;

    let first = t.engine.insert_row(id, &row! { "a" => "before" }).unwrap();

    let field = t.engine.add_field(id, "c", "int").unwrap();
    assert_eq!(field.field_type, FieldType::Integer);

    let second = t
        .engine
        .insert_row(id, &row! { "a" => "after", "c" => 5i64 })
        .unwrap();

    let rows: Vec<_> = t
        .engine
        .list_rows(id)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].id, first);
    assert_eq!(rows[0].get("c"), Some(&FieldValue::Null));
    assert_eq!(rows[1].id, second);
    assert_eq!(rows[1].get("c"), Some(&FieldValue::Integer(5)));

    assert!(t.engine.reconcile(id).unwrap().is_consistent());
}

#[test]
fn test_add_duplicate_field_rejected() {
    let t = TestEngine::new();
    let info = t
        .engine
        .create_table(&CreateTableRequest::new("d").field("a", "str"))
        .unwrap();

    let err = t.engine.add_field(info.table.id, "A", "int").unwrap_err();
    assert!(matches!(err, MorphDbError::DuplicateField { .. }));

    let fields = t.engine.get_fields(info.table.id).unwrap();
    assert_eq!(fields.len(), 1);
    assert!(t.engine.reconcile(info.table.id).unwrap().is_consistent());
}

#[test]
fn test_add_field_unknown_table() {
    let t = TestEngine::new();
    let err = t.engine.add_field(TableId::new(999), "a", "int").unwrap_err();
    assert!(matches!(err, MorphDbError::TableNotFound(id) if id == TableId::new(999)));
}

#[test]
fn test_add_field_unknown_type_changes_nothing() {
    let t = TestEngine::new();
    let info = t.engine.create_table(&CreateTableRequest::new("u")).unwrap();

    let err = t.engine.add_field(info.table.id, "x", "blob").unwrap_err();
    assert!(matches!(err, MorphDbError::UnknownType(_)));
    assert!(t.engine.get_fields(info.table.id).unwrap().is_empty());
}

#[test]
fn test_add_fields_skips_existing_names() {
    let t = TestEngine::new();
    let info = t
        .engine
        .create_table(&CreateTableRequest::new("bulk").field("a", "str"))
        .unwrap();

    let mut more = BTreeMap::new();
    more.insert("a".to_string(), "int".to_string());
    more.insert("b".to_string(), "bool".to_string());

    let updated = t.engine.add_fields(info.table.id, &more).unwrap();
    assert_eq!(updated.fields.len(), 2);
    assert_eq!(updated.field("a").map(|f| f.field_type), Some(FieldType::String));
    assert_eq!(updated.field("b").map(|f| f.field_type), Some(FieldType::Boolean));
}

#[test]
fn test_concurrent_add_field_same_name() {
    let t = TestEngine::new();
    let id = t.engine.create_table(&CreateTableRequest::new("race")).unwrap().table.id;

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = &t.engine;
                scope.spawn(move || engine.add_field(id, "shared", "int"))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, MorphDbError::DuplicateField { .. })));
    assert!(t.engine.reconcile(id).unwrap().is_consistent());
}

#[test]
fn test_round_trip_all_types() {
    let t = TestEngine::new();
    let id = t.engine.create_table(&people_request()).unwrap().table.id;

    let row_id = t
        .engine
        .insert_row(
            id,
            &row! { "name" => "x", "age" => 42i64, "score" => 3.14f64, "active" => true },
        )
        .unwrap();

    let rows: Vec<_> = t
        .engine
        .list_rows(id)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.id, row_id);
    assert_eq!(row.get("name"), Some(&FieldValue::String("x".into())));
    assert_eq!(row.get("age"), Some(&FieldValue::Integer(42)));
    assert_eq!(row.get("score"), Some(&FieldValue::Float(3.14)));
    assert_eq!(row.get("active"), Some(&FieldValue::Boolean(true)));
}

#[test]
fn test_absent_fields_read_back_as_null() {
    let t = TestEngine::new();
    let id = t.engine.create_table(&people_request()).unwrap().table.id;

    t.engine.insert_row(id, &row! { "age" => 7i64 }).unwrap();

    let row = t.engine.list_rows(id).unwrap().next().unwrap().unwrap();
    assert_eq!(row.get("age"), Some(&FieldValue::Integer(7)));
    assert_eq!(row.get("name"), Some(&FieldValue::Null));
    assert_eq!(row.get("active"), Some(&FieldValue::Null));
}

#[test]
fn test_unknown_key_rejected_and_nothing_written() {
    let t = TestEngine::new();
    let id = t
        .engine
        .create_table(&CreateTableRequest::new("strict").field("a", "int"))
        .unwrap()
        .table
        .id;

    let err = t
        .engine
        .insert_row(id, &row! { "a" => 1i64, "b" => 2i64 })
        .unwrap_err();
    assert!(matches!(err, MorphDbError::UnknownField { ref field, .. } if field == "b"));

    assert_eq!(t.engine.list_rows(id).unwrap().count(), 0);
}

#[test]
fn test_type_mismatch_rejected() {
    let t = TestEngine::new();
    let id = t.engine.create_table(&people_request()).unwrap().table.id;

    let err = t.engine.insert_row(id, &row! { "age" => "old" }).unwrap_err();
    assert!(matches!(err, MorphDbError::TypeMismatch { .. }));

    // integers are accepted for float fields
    t.engine.insert_row(id, &row! { "score" => 2i64 }).unwrap();
    let row = t.engine.list_rows(id).unwrap().next().unwrap().unwrap();
    assert_eq!(row.get("score"), Some(&FieldValue::Float(2.0)));
}

#[test]
fn test_insert_into_unknown_table() {
    let t = TestEngine::new();
    let err = t.engine.insert_row(TableId::new(42), &BTreeMap::new()).unwrap_err();
    assert!(matches!(err, MorphDbError::TableNotFound(_)));
    assert!(matches!(
        t.engine.list_rows(TableId::new(42)),
        Err(MorphDbError::TableNotFound(_))
    ));
}

#[test]
fn test_list_rows_pages_and_restarts() {
    let mut config = morphdb_configs::MorphDbConfig::default();
    config.rows.scan_batch_size = 3;
    let t = TestEngine::with_config(config);
    let id = t
        .engine
        .create_table(&CreateTableRequest::new("many").field("n", "int"))
        .unwrap()
        .table
        .id;

    for n in 0..10i64 {
        t.engine.insert_row(id, &row! { "n" => n }).unwrap();
    }

    let mut scan = t.engine.list_rows(id).unwrap();
    let ids: Vec<RowId> = scan.by_ref().map(|r| r.unwrap().id).collect();
    assert_eq!(ids.len(), 10);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    scan.restart();
    assert_eq!(scan.count(), 10);
}

#[test]
fn test_state_visible_to_reopened_engine() {
    let t = TestEngine::new();
    let id = t.engine.create_table(&people_request()).unwrap().table.id;
    t.engine.insert_row(id, &row! { "name" => "persisted" }).unwrap();

    let other = t.reopen();
    assert_eq!(other.get_table(id).unwrap().external_name.as_deref(), Some("people"));
    let row = other.list_rows(id).unwrap().next().unwrap().unwrap();
    assert_eq!(row.get("name"), Some(&FieldValue::String("persisted".into())));
}

#[test]
fn test_reconcile_detects_manual_column() {
    let t = TestEngine::new();
    let info = t
        .engine
        .create_table(&CreateTableRequest::new("drift").field("a", "int"))
        .unwrap();

    t.db.backend
        .read(|conn| {
            conn.execute_batch(&format!(
                "ALTER TABLE \"{}\" ADD COLUMN stray TEXT",
                info.table.internal_name
            ))
            .map_err(morphdb_store::StoreError::from)
        })
        .unwrap();

    let report = t.engine.reconcile(info.table.id).unwrap();
    assert!(!report.is_consistent());
    assert_eq!(report.orphaned_columns, vec!["stray".to_string()]);
    assert!(report.missing_columns.is_empty());
}

fn create_stray_table(t: &TestEngine, name: &str) {
    t.db.backend
        .read(|conn| {
            conn.execute_batch(&format!("CREATE TABLE \"{}\" (x INTEGER)", name))
                .map_err(morphdb_store::StoreError::from)
        })
        .unwrap();
}

#[test]
fn test_failed_create_table_leaves_no_catalog_rows() {
    let t = TestEngine::new();
    create_stray_table(&t, "dynamic_table_1");

    let err = t
        .engine
        .create_table(&CreateTableRequest::new("blocked").field("a", "int"))
        .unwrap_err();
    assert!(matches!(err, MorphDbError::DdlFailure { ref target, .. } if target == "dynamic_table_1"));
    assert!(t.engine.list_tables().unwrap().is_empty());
}

#[test]
fn test_create_table_retry_moves_past_taken_name() {
    let t = TestEngine::new();
    create_stray_table(&t, "dynamic_table_1");

    let request = CreateTableRequest::new("retry").field("a", "int");
    assert!(t.engine.create_table(&request).is_err());

    let info = t.engine.create_table(&request).unwrap();
    assert_eq!(info.table.internal_name.as_str(), "dynamic_table_2");
    assert_eq!(t.engine.list_tables().unwrap().len(), 1);
    assert!(t.engine.reconcile(info.table.id).unwrap().is_consistent());
}

#[test]
fn test_failed_add_field_leaves_field_unregistered() {
    let t = TestEngine::new();
    let info = t
        .engine
        .create_table(&CreateTableRequest::new("clash").field("a", "str"))
        .unwrap();
    let id = info.table.id;

    t.db.backend
        .read(|conn| {
            conn.execute_batch(&format!(
                "ALTER TABLE \"{}\" ADD COLUMN x INTEGER",
                info.table.internal_name
            ))
            .map_err(morphdb_store::StoreError::from)
        })
        .unwrap();

    let before = t.engine.get_fields(id).unwrap();
    let err = t.engine.add_field(id, "x", "int").unwrap_err();
    assert!(matches!(err, MorphDbError::DdlFailure { .. }));
    assert_eq!(t.engine.get_fields(id).unwrap(), before);
}
