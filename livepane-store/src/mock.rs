//! A scriptable record store for testing the preview engine.

use crate::error::{StoreError, StoreResult};
use crate::{RecordStore, Row};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scripted outcome for one `execute` call.
enum Scripted {
    Rows(Vec<Row>),
    Fail(String),
}

/// A mock store with controllable readiness flags and scripted results.
///
/// Each `execute` call consumes the next scripted outcome; when the script
/// runs out, the last scripted row set repeats (so a single `push_rows`
/// serves any number of cycles).
#[derive(Default)]
pub struct MockRecordStore {
    script: Mutex<VecDeque<Scripted>>,
    last_rows: Mutex<Vec<Row>>,
    loading: AtomicBool,
    error: Mutex<Option<String>>,
    schema_initialized: AtomicBool,
    calls: AtomicUsize,
}

impl MockRecordStore {
    /// Creates a ready mock store with no scripted rows.
    pub fn new() -> Self {
        let store = Self::default();
        store.schema_initialized.store(true, Ordering::Relaxed);
        store
    }

    /// Queues a row set for the next `execute` call.
    pub fn push_rows(&self, rows: Vec<Row>) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Rows(rows));
    }

    /// Queues a failure for the next `execute` call.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Fail(message.into()));
    }

    /// Flips the `loading` readiness flag.
    pub fn set_loading(&self, loading: bool) {
        self.loading.store(loading, Ordering::Relaxed);
    }

    /// Sets or clears the store error flag.
    pub fn set_error(&self, error: Option<String>) {
        *self.error.lock().unwrap() = error;
    }

    /// Flips the schema readiness flag.
    pub fn set_schema_initialized(&self, ready: bool) {
        self.schema_initialized.store(ready, Ordering::Relaxed);
    }

    /// Number of `execute` calls observed.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl RecordStore for MockRecordStore {
    fn execute(&self, _sql: &str, _params: &[Value]) -> StoreResult<Vec<Row>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Rows(rows)) => {
                *self.last_rows.lock().unwrap() = rows.clone();
                Ok(rows)
            }
            Some(Scripted::Fail(message)) => Err(StoreError::Unavailable(message)),
            None => Ok(self.last_rows.lock().unwrap().clone()),
        }
    }

    fn loading(&self) -> bool {
        self.loading.load(Ordering::Relaxed)
    }

    fn error(&self) -> Option<String> {
        self.error.lock().unwrap().clone()
    }

    fn schema_initialized(&self) -> bool {
        self.schema_initialized.load(Ordering::Relaxed)
    }
}

/// Builds a projection row in the shape the join query produces.
pub fn record_row(id: i64, name: &str, kind: &str, data: &str, url: &str) -> Row {
    let mut row = Row::new();
    row.insert("id".into(), Value::from(id));
    row.insert("name".into(), Value::from(name));
    row.insert("kind".into(), Value::from(kind));
    row.insert("data".into(), Value::from(data));
    row.insert("url".into(), Value::from(url));
    row
}
