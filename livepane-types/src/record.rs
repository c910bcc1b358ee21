//! The projected record type and its payload parsing rules.

use crate::ids::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a record, taken from the store's type table.
///
/// The store may grow kinds the engine does not know about; those come
/// through as `Other` rather than failing the projection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A renderable document (page, post, template source).
    Document,
    /// A binary or referenced asset (image, stylesheet).
    Asset,
    /// Any kind the engine has no special handling for.
    #[serde(untagged)]
    Other(String),
}

impl RecordKind {
    /// Parses a kind from the store's type-name column, case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "document" => Self::Document,
            "asset" => Self::Asset,
            _ => Self::Other(name.to_string()),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => write!(f, "document"),
            Self::Asset => write!(f, "asset"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// One logical file-like entity projected out of the relational store.
///
/// The `payload` field holds arbitrary JSON parsed from the store's
/// serialized data column; its structure is owned by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub kind: RecordKind,
    pub payload: serde_json::Value,
    pub locator: String,
}

impl Record {
    /// Creates a record with an empty payload and locator.
    pub fn new(id: RecordId, name: impl Into<String>, kind: RecordKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            payload: empty_payload(),
            locator: String::new(),
        }
    }

    /// Sets the payload.
    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Sets the locator.
    #[must_use]
    pub fn with_locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = locator.into();
        self
    }
}

/// Parses a serialized payload column into JSON.
///
/// An absent column, an empty string, or malformed JSON all yield the
/// defined default (an empty object) — the projection never fails on a
/// bad payload, it degrades to "no data".
#[must_use]
pub fn parse_payload(raw: Option<&str>) -> serde_json::Value {
    match raw {
        Some(text) if !text.is_empty() => {
            serde_json::from_str(text).unwrap_or_else(|_| empty_payload())
        }
        _ => empty_payload(),
    }
}

fn empty_payload() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
