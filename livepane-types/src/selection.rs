//! Host-owned selection state.

use crate::ids::RecordId;
use serde::{Deserialize, Serialize};

/// Which record is the editing target vs. which record drives the preview.
///
/// Owned by the host; the preview engine reads `content_id` each cycle and
/// requests updates to both fields when navigation is intercepted inside
/// the sandbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// The record open in the editing surface.
    pub active_id: Option<RecordId>,
    /// The record the preview renders from.
    pub content_id: Option<RecordId>,
}

impl SelectionState {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a selection with both fields pointing at the same record.
    #[must_use]
    pub fn of(id: RecordId) -> Self {
        Self {
            active_id: Some(id),
            content_id: Some(id),
        }
    }

    /// Points both fields at the given record, as intercepted navigation does.
    pub fn select(&mut self, id: RecordId) {
        self.active_id = Some(id);
        self.content_id = Some(id);
    }
}
