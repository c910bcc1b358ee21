//! Isolated-context side of the LivePane preview.
//!
//! This crate is what the sandboxed rendering context runs: it receives
//! patch messages from the host engine, applies them to its live document
//! tree in place, and intercepts internal link activations so they flow
//! back to the host as selection changes instead of real navigations.
//!
//! # Components
//!
//! - **Applicator**: the state machine gating and applying `update`
//!   patches, with its lazily loaded diff engine
//! - **Loader**: the async seam through which the diff engine arrives
//! - **Navigation**: classifies link activations into intercepted
//!   internal targets and passed-through external ones
//! - **Sandbox**: ties the pieces to one channel endpoint
//!
//! Nothing here shares state with the host; the only coupling is the
//! message channel, and every precondition failure on this side is a
//! dropped message with a diagnostic, never an error the host sees.

mod applicator;
mod error;
mod loader;
mod navigation;
mod sandbox;

pub use applicator::{ApplyOutcome, DropReason, PatchApplicator, SandboxState};
pub use error::{SandboxError, SandboxResult};
pub use loader::{DiffLoader, InstantDiffLoader};
pub use navigation::{Disposition, NavigationInterceptor};
pub use sandbox::PreviewSandbox;
