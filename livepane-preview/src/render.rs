//! The content renderer seam.
//!
//! Rendering itself lives outside this engine; the trait captures exactly
//! the contract the engine relies on: a synchronous call with the selected
//! record id and the full snapshot, returning markup or failing. A failure
//! clears the preview for that cycle and is never retried explicitly — the
//! next trigger is the retry.

use crate::loader::Projection;
use livepane_types::RecordId;

/// Turns the selected record plus the full record snapshot into markup.
pub trait ContentRenderer: Send + Sync {
    /// Whether the renderer is loaded and usable. Cycles skip entirely
    /// while this is false.
    fn available(&self) -> bool {
        true
    }

    /// Renders the record identified by `content_id` against the snapshot.
    fn render(&self, content_id: RecordId, records: &Projection) -> anyhow::Result<String>;
}

/// Test renderers.
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// A deterministic renderer: emits the selected record's name and its
    /// payload `text` field. Scriptable availability and failure.
    #[derive(Default)]
    pub struct MockRenderer {
        unavailable: AtomicBool,
        fail_next: AtomicBool,
        calls: AtomicUsize,
        last_markup: Mutex<Option<String>>,
    }

    impl MockRenderer {
        /// Creates an available, non-failing mock renderer.
        pub fn new() -> Self {
            Self::default()
        }

        /// Flips availability.
        pub fn set_available(&self, available: bool) {
            self.unavailable.store(!available, Ordering::Relaxed);
        }

        /// Makes every following render call fail.
        pub fn fail(&self) {
            self.fail_next.store(true, Ordering::Relaxed);
        }

        /// Number of render calls observed.
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::Relaxed)
        }

        /// The markup produced by the most recent successful call.
        pub fn last_markup(&self) -> Option<String> {
            self.last_markup.lock().unwrap().clone()
        }
    }

    impl ContentRenderer for MockRenderer {
        fn available(&self) -> bool {
            !self.unavailable.load(Ordering::Relaxed)
        }

        fn render(&self, content_id: RecordId, records: &Projection) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if self.fail_next.load(Ordering::Relaxed) {
                anyhow::bail!("renderer failure (scripted)");
            }
            let record = records
                .get(&content_id)
                .ok_or_else(|| anyhow::anyhow!("record {content_id} not in snapshot"))?;
            let text = record
                .payload
                .get("text")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default();
            let markup = format!("<h1>{}</h1><p>{}</p>", record.name, text);
            *self.last_markup.lock().unwrap() = Some(markup.clone());
            Ok(markup)
        }
    }
}
