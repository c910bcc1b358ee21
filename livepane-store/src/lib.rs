//! Embedded SQLite record store for LivePane.
//!
//! The preview engine consumes the store only through the [`RecordStore`]
//! trait: an `execute(sql, params) -> rows` surface plus three readiness
//! flags. Rows come back as loosely typed column-name → JSON maps, the same
//! shape an embedded SQL engine hands to script callers.
//!
//! [`SqliteRecordStore`] is the bundled implementation, holding the
//! `model` / `file` schema the projection query joins over. The `mock`
//! module provides a scriptable store for engine tests.

mod error;
pub mod mock;
mod sqlite;

pub use error::{StoreError, StoreResult};
pub use sqlite::SqliteRecordStore;

use serde_json::Value;
use std::collections::HashMap;

/// One result row: column name → value.
pub type Row = HashMap<String, Value>;

/// Read/execute interface over the relational store, with the readiness
/// flags the engine gates each cycle on.
///
/// Calls are blocking; async callers wrap them in `spawn_blocking`.
pub trait RecordStore: Send + Sync {
    /// Runs a parameterized statement and returns the result rows
    /// (empty for statements that produce none).
    fn execute(&self, sql: &str, params: &[Value]) -> StoreResult<Vec<Row>>;

    /// Whether the store is still starting up.
    fn loading(&self) -> bool {
        false
    }

    /// A startup or fatal store error, if any.
    fn error(&self) -> Option<String> {
        None
    }

    /// Whether the schema has been created.
    fn schema_initialized(&self) -> bool;
}
