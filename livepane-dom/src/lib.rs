//! Live document tree, HTML parsing and in-place reconcile for LivePane.
//!
//! The sandboxed preview keeps a *live* tree whose nodes carry persistent
//! identity (modeling focus, scroll position and other per-node state a
//! real document accumulates). Incoming markup is parsed into an immutable
//! *target* tree and reconciled into the live tree in place: nodes that
//! still match keep their identity, everything else is replaced. This is
//! why the preview patches instead of reloading — a wholesale replacement
//! would discard all of that live state.
//!
//! # Components
//!
//! - **tree**: the parsed [`Node`] and the identity-carrying [`LiveNode`]
//! - **parser**: html5ever parse of a markup string into a body [`Node`]
//! - **reconcile**: the [`DiffEngine`] that patches a live tree toward a
//!   target

mod error;
mod parser;
mod reconcile;
mod tree;

pub use error::{DomError, DomResult};
pub use parser::parse_body;
pub use reconcile::DiffEngine;
pub use tree::{LiveNode, Node};
