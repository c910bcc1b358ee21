//! The async seam through which the diff engine arrives.
//!
//! The real context fetches its patching library over the network after it
//! boots, so readiness is inherently delayed. The trait keeps that delay
//! explicit and lets tests hold the applicator in its loading state for as
//! long as they need.

use crate::error::{SandboxError, SandboxResult};
use async_trait::async_trait;
use livepane_dom::DiffEngine;

/// Produces the diff engine, possibly after a delay.
#[async_trait]
pub trait DiffLoader: Send + Sync {
    /// Resolves to a ready diff engine or a load failure.
    async fn load(&self) -> SandboxResult<DiffEngine>;
}

/// A loader that resolves immediately — the in-process equivalent of a
/// cached library.
pub struct InstantDiffLoader;

#[async_trait]
impl DiffLoader for InstantDiffLoader {
    async fn load(&self) -> SandboxResult<DiffEngine> {
        Ok(DiffEngine::new())
    }
}

impl SandboxError {
    /// Convenience constructor for loader implementations.
    pub fn diff_load(detail: impl Into<String>) -> Self {
        Self::DiffLoad(detail.into())
    }
}
