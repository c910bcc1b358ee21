//! Record projection loading.
//!
//! On every settled trigger the loader rebuilds the full in-memory record
//! snapshot from a single join query. The snapshot is immutable once
//! published; a failed reload keeps the previous snapshot published rather
//! than ever exposing a partial one.

use livepane_store::RecordStore;
use livepane_types::{Record, RecordId, RecordKind, parse_payload};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// The in-memory snapshot of all current records, keyed by id.
pub type Projection = HashMap<RecordId, Record>;

/// The join over the file-like table and its type table that feeds the
/// projection.
pub const PROJECTION_QUERY: &str = "SELECT file.id, file.name, file.data, file.url, \
     model.name AS kind \
     FROM file JOIN model ON file.model_id = model.id;";

/// Rebuilds the projection each cycle and retains the last good snapshot.
pub struct ProjectionLoader {
    store: Arc<dyn RecordStore>,
    snapshot: Arc<Projection>,
}

impl ProjectionLoader {
    /// Creates a loader with an empty initial snapshot.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            snapshot: Arc::new(Projection::new()),
        }
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<Projection> {
        self.snapshot.clone()
    }

    /// Whether the store side of upstream readiness holds.
    pub fn store_ready(&self) -> bool {
        !self.store.loading() && self.store.error().is_none() && self.store.schema_initialized()
    }

    /// Runs the join query and publishes a fresh snapshot.
    ///
    /// Any query failure is caught and logged; the previous snapshot stays
    /// published. Returns whichever snapshot is current afterwards.
    pub async fn reload(&mut self) -> Arc<Projection> {
        let store = self.store.clone();
        let fetched =
            tokio::task::spawn_blocking(move || store.execute(PROJECTION_QUERY, &[])).await;

        match fetched {
            Ok(Ok(rows)) => {
                let projection = project_rows(&rows);
                debug!(records = projection.len(), "projection rebuilt");
                self.snapshot = Arc::new(projection);
            }
            Ok(Err(e)) => {
                warn!("projection query failed, keeping previous snapshot: {e}");
            }
            Err(e) => {
                warn!("projection task panicked, keeping previous snapshot: {e}");
            }
        }

        self.snapshot.clone()
    }
}

/// Projects result rows into records.
///
/// Mapping rules: `data` parses as JSON with an empty-object default,
/// `name` and `url` default to empty strings. A row without an integer id
/// cannot be keyed and is skipped with a warning.
fn project_rows(rows: &[livepane_store::Row]) -> Projection {
    let mut projection = Projection::with_capacity(rows.len());

    for row in rows {
        let Some(id) = row.get("id").and_then(serde_json::Value::as_i64) else {
            warn!("projection row without integer id skipped");
            continue;
        };
        let id = RecordId::new(id);

        let name = row
            .get("name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();
        let kind = RecordKind::parse(
            row.get("kind")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default(),
        );
        let payload = parse_payload(row.get("data").and_then(serde_json::Value::as_str));
        let locator = row
            .get("url")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();

        projection.insert(
            id,
            Record::new(id, name, kind)
                .with_payload(payload)
                .with_locator(locator),
        );
    }

    projection
}
