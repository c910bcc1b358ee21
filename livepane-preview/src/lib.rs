//! Host-side preview synchronization engine for LivePane.
//!
//! Keeps a sandboxed live preview in step with the records of an embedded
//! relational store without ever reloading the preview context: renders are
//! shipped across the isolation boundary as patch messages, and navigation
//! inside the preview flows back as a selection change.
//!
//! # Components
//!
//! - **Protocol**: the typed messages crossing the isolation boundary
//! - **Channel**: fire-and-forget endpoints over in-process queues
//! - **Debounce**: coalesces trigger bursts into single settle signals
//! - **Loader**: projects the store's join query into a record snapshot
//! - **Render**: the content renderer seam
//! - **Engine**: orchestrates one synchronization cycle per settle
//!
//! # Synchronization cycle
//!
//! 1. **Trigger**: selection change, data refresh, keystroke or click
//! 2. **Settle**: the debouncer emits once per quiet window
//! 3. **Reload**: the projection is rebuilt from the store (or kept stale
//!    on failure)
//! 4. **Render**: the content renderer produces markup for the selected
//!    record
//! 5. **Ship**: the markup crosses the boundary as an `update` patch
//!
//! The reverse path — an intercepted link inside the preview — arrives as a
//! `navigate` message and rebinds the host selection, which fires a fresh
//! trigger.
//!
//! No failure in this engine is fatal: every error class degrades to a
//! stale or blank preview and the next natural trigger is the retry.

pub mod channel;
pub mod debounce;
mod engine;
mod loader;
pub mod protocol;
pub mod render;

pub use channel::PreviewEndpoint;
pub use debounce::{Debouncer, Settle, TriggerHandle, TriggerSource};
pub use engine::{ChannelState, PreviewConfig, PreviewEngine};
pub use loader::{PROJECTION_QUERY, Projection, ProjectionLoader};
pub use protocol::PreviewMessage;
pub use render::ContentRenderer;
