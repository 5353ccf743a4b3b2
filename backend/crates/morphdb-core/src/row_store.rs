//! GenericRowStore - insert and list rows of any dynamic table
//!
//! Rows travel as generic `name -> value` maps. The physical SQL is generated
//! from the descriptor the caller just built, never from a cached shape.

use crate::descriptor::ModelDescriptor;
use crate::error::{MorphDbError, Result};
use morphdb_commons::{FieldValue, Row, RowId, PRIMARY_KEY_COLUMN};
use morphdb_store::sql::{placeholders, quote_ident};
use morphdb_store::value::{read_value, SqlValue};
use morphdb_store::SqliteBackend;
use rusqlite::types::ToSql;
use rusqlite::{params, Connection};
use std::collections::{BTreeMap, VecDeque};

#[derive(Debug, Clone)]
pub struct GenericRowStore {
    scan_batch_size: usize,
}

impl GenericRowStore {
    pub fn new(scan_batch_size: usize) -> Self {
        Self {
            scan_batch_size: scan_batch_size.max(1),
        }
    }

    /// Validate `row` against `descriptor` and write it.
    ///
    /// Every key must name a column; unknown keys are rejected rather than
    /// dropped. Absent columns are stored as NULL. Nothing is written unless the
    /// whole row validates.
    pub fn insert(
        &self,
        conn: &Connection,
        descriptor: &ModelDescriptor,
        row: &BTreeMap<String, FieldValue>,
    ) -> Result<RowId> {
        validate_row(descriptor, row)?;

        let present: Vec<(&str, &FieldValue)> = descriptor
            .columns
            .iter()
            .filter_map(|c| row.get(&c.name).map(|v| (c.name.as_str(), v)))
            .collect();

        let table = quote_ident(descriptor.internal_name.as_str());
        let sql = if present.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", table)
        } else {
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                table,
                present
                    .iter()
                    .map(|(name, _)| quote_ident(name))
                    .collect::<Vec<_>>()
                    .join(", "),
                placeholders(present.len())
            )
        };

        let values: Vec<SqlValue<'_>> = present.iter().map(|(_, v)| SqlValue(*v)).collect();
        let bound: Vec<&dyn ToSql> = values.iter().map(|v| v as &dyn ToSql).collect();
        conn.execute(&sql, bound.as_slice())?;

        let row_id = RowId::new(conn.last_insert_rowid());
        log::debug!(
            "Inserted row {} into {} ({} value(s))",
            row_id,
            descriptor.internal_name,
            present.len()
        );
        Ok(row_id)
    }

    /// Lazy, restartable scan over every row of the descriptor's table.
    pub fn scan(&self, backend: SqliteBackend, descriptor: ModelDescriptor) -> RowScan {
        RowScan::new(backend, descriptor, self.scan_batch_size)
    }

    /// Up to `limit` rows with primary key greater than `after`, in key order.
    pub fn fetch_page(
        &self,
        conn: &Connection,
        descriptor: &ModelDescriptor,
        after: Option<RowId>,
        limit: usize,
    ) -> Result<Vec<Row>> {
        let mut columns = vec![quote_ident(PRIMARY_KEY_COLUMN)];
        columns.extend(descriptor.column_names().map(quote_ident));

        let sql = format!(
            "SELECT {} FROM {} WHERE {pk} > ?1 ORDER BY {pk} LIMIT ?2",
            columns.join(", "),
            quote_ident(descriptor.internal_name.as_str()),
            pk = quote_ident(PRIMARY_KEY_COLUMN),
        );

        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(params![
            after.map_or(0, |id| id.as_i64()),
            i64::try_from(limit).unwrap_or(i64::MAX)
        ])?;

        let mut page = Vec::new();
        while let Some(raw) = rows.next()? {
            let id = RowId::new(raw.get(0)?);
            let mut values = Vec::with_capacity(descriptor.len());
            for (idx, column) in descriptor.columns.iter().enumerate() {
                let value = read_value(&column.name, raw.get_ref(idx + 1)?, column.field_type)?;
                values.push((column.name.clone(), value));
            }
            page.push(Row::new(id, values));
        }
        Ok(page)
    }
}

fn validate_row(descriptor: &ModelDescriptor, row: &BTreeMap<String, FieldValue>) -> Result<()> {
    for (name, value) in row {
        let column = descriptor
            .column(name)
            .ok_or_else(|| MorphDbError::UnknownField {
                table_id: descriptor.table_id,
                field: name.clone(),
            })?;

        if !value.fits(column.field_type) {
            return Err(MorphDbError::TypeMismatch {
                field: name.clone(),
                expected: column.field_type,
                actual: value.kind(),
            });
        }

        if let (FieldValue::String(s), Some(max)) = (value, column.physical_type.max_length()) {
            let length = s.chars().count();
            if length > max as usize {
                return Err(MorphDbError::ValueTooLong {
                    field: name.clone(),
                    length,
                    max,
                });
            }
        }
    }
    Ok(())
}

/// Lazy sequence of rows read page by page.
///
/// Each page is fetched on its own short-lived connection using keyset
/// pagination on the primary key. The column shape is fixed by the descriptor
/// the scan was created with. Call [`RowScan::restart`] to iterate again from
/// the first row.
pub struct RowScan {
    backend: SqliteBackend,
    store: GenericRowStore,
    descriptor: ModelDescriptor,
    cursor: Option<RowId>,
    buffer: VecDeque<Row>,
    exhausted: bool,
}

impl RowScan {
    fn new(backend: SqliteBackend, descriptor: ModelDescriptor, batch_size: usize) -> Self {
        Self {
            backend,
            store: GenericRowStore::new(batch_size),
            descriptor,
            cursor: None,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Rewind to the first row. Rows inserted since the previous pass are seen.
    pub fn restart(&mut self) {
        self.cursor = None;
        self.buffer.clear();
        self.exhausted = false;
    }

    fn fill(&mut self) -> Result<()> {
        let limit = self.store.scan_batch_size;
        let page = self
            .backend
            .read(|conn| self.store.fetch_page(conn, &self.descriptor, self.cursor, limit))?;

        if page.len() < limit {
            self.exhausted = true;
        }
        if let Some(last) = page.last() {
            self.cursor = Some(last.id);
        }
        self.buffer.extend(page);
        Ok(())
    }
}

impl Iterator for RowScan {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() && !self.exhausted {
            if let Err(e) = self.fill() {
                self.exhausted = true;
                return Some(Err(e));
            }
        }
        self.buffer.pop_front().map(Ok)
    }
}
