//! Bundled-SQLite implementation of the record store.

use crate::error::{StoreError, StoreResult};
use crate::{RecordStore, Row};
use livepane_types::{RecordId, RecordKind};
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::debug;

/// Schema for the file-like entity and its type table, created on open.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS model (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS file (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL DEFAULT '',
    data TEXT,
    url TEXT NOT NULL DEFAULT '',
    model_id INTEGER NOT NULL REFERENCES model(id)
);
INSERT OR IGNORE INTO model (name) VALUES ('document'), ('asset');
";

/// Record store backed by an embedded SQLite database.
pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
    schema_initialized: AtomicBool,
}

impl SqliteRecordStore {
    /// Opens an in-memory store and initializes the schema.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Opens (or creates) a file-backed store and initializes the schema.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
            schema_initialized: AtomicBool::new(true),
        })
    }

    /// Inserts a record, creating the kind's type row if needed.
    /// Returns the store-assigned id.
    pub fn insert_record(
        &self,
        name: &str,
        kind: &RecordKind,
        data: Option<&str>,
        url: &str,
    ) -> StoreResult<RecordId> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        conn.execute(
            "INSERT OR IGNORE INTO model (name) VALUES (?1)",
            [kind.to_string()],
        )?;
        conn.execute(
            "INSERT INTO file (name, data, url, model_id)
             VALUES (?1, ?2, ?3, (SELECT id FROM model WHERE name = ?4))",
            rusqlite::params![name, data, url, kind.to_string()],
        )?;
        Ok(RecordId::new(conn.last_insert_rowid()))
    }

    /// Fetches the serialized payload of a single record by name —
    /// the read half of the single-record edit surface.
    pub fn payload_by_name(&self, name: &str) -> StoreResult<Option<String>> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let mut stmt = conn.prepare("SELECT data FROM file WHERE name = ?1")?;
        let mut rows = stmt.query([name])?;
        match rows.next()? {
            Some(row) => Ok(row.get::<_, Option<String>>(0)?),
            None => Ok(None),
        }
    }

    /// Rewrites the serialized payload of a single record by name and kind —
    /// the write half of the single-record edit surface. Returns the number
    /// of rows touched.
    pub fn update_payload_by_name(
        &self,
        name: &str,
        kind: &RecordKind,
        data: &str,
    ) -> StoreResult<usize> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let changed = conn.execute(
            "UPDATE file SET data = ?1
             WHERE name = ?2
               AND model_id = (SELECT id FROM model WHERE name = ?3)",
            rusqlite::params![data, name, kind.to_string()],
        )?;
        Ok(changed)
    }
}

impl RecordStore for SqliteRecordStore {
    fn execute(&self, sql: &str, params: &[Value]) -> StoreResult<Vec<Row>> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let bound = params
            .iter()
            .enumerate()
            .map(|(i, v)| json_to_sql(i, v))
            .collect::<StoreResult<Vec<_>>>()?;

        let mut rows = stmt.query(rusqlite::params_from_iter(bound))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut map = Row::with_capacity(columns.len());
            for (i, col) in columns.iter().enumerate() {
                map.insert(col.clone(), sql_to_json(col, row.get_ref(i)?));
            }
            out.push(map);
        }
        Ok(out)
    }

    fn schema_initialized(&self) -> bool {
        self.schema_initialized.load(Ordering::Relaxed)
    }
}

/// Maps a JSON bind parameter to a SQLite value.
fn json_to_sql(index: usize, value: &Value) -> StoreResult<rusqlite::types::Value> {
    use rusqlite::types::Value as Sql;
    match value {
        Value::Null => Ok(Sql::Null),
        Value::Bool(b) => Ok(Sql::Integer(i64::from(*b))),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Sql::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Sql::Real(f))
            } else {
                Err(StoreError::UnsupportedParam {
                    index,
                    detail: format!("numeric value out of range: {n}"),
                })
            }
        }
        Value::String(s) => Ok(Sql::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => Err(StoreError::UnsupportedParam {
            index,
            detail: "structured values must be serialized before binding".into(),
        }),
    }
}

/// Maps a SQLite column value to JSON. BLOB columns surface as null;
/// the projection has no use for raw bytes.
fn sql_to_json(column: &str, value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(_) => {
            debug!(column, "blob column surfaced as null");
            Value::Null
        }
    }
}
