//! Messages crossing the isolation boundary.
//!
//! The wire shape is a tagged JSON object — `{"type":"update","html":...}` —
//! so either side can interoperate with a real scripted context. Unknown
//! `type` values are ignored, never an error: the channel is fire-and-forget
//! in both directions and tolerates peers it does not fully understand.

use serde::{Deserialize, Serialize};

/// A message exchanged between the preview engine and the sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PreviewMessage {
    /// Handshake. Engine → sandbox after the context loads; sandbox →
    /// engine once its diff engine is installed and patches can apply.
    Initialize,

    /// A freshly rendered frame to patch into the live tree.
    Update {
        /// The full rendered markup; diffed only on the receiving side.
        html: String,
    },

    /// An intercepted internal link, forwarded instead of navigating.
    Navigate {
        /// The link target, still carrying its leading path marker.
        path: String,
    },
}

impl PreviewMessage {
    /// Creates an update message.
    pub fn update(html: impl Into<String>) -> Self {
        Self::Update { html: html.into() }
    }

    /// Creates a navigate message.
    pub fn navigate(path: impl Into<String>) -> Self {
        Self::Navigate { path: path.into() }
    }

    /// Decodes a wire value. Returns `None` for unrecognized or malformed
    /// messages — those are dropped silently by contract.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// Encodes to the wire value.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("message serialization is infallible")
    }
}
