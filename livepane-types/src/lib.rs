//! Core type definitions for LivePane.
//!
//! Shared between the host-side preview engine and the sandboxed
//! patch applicator:
//!
//! - **Ids**: store-assigned integer record identifiers
//! - **Record**: one projected row of the relational store
//! - **Selection**: which record is edited vs. which drives the preview

mod ids;
mod record;
mod selection;

pub use ids::RecordId;
pub use record::{Record, RecordKind, parse_payload};
pub use selection::SelectionState;
