//! The assembled isolated context.

use crate::applicator::{ApplyOutcome, PatchApplicator};
use crate::error::SandboxResult;
use crate::loader::DiffLoader;
use crate::navigation::{Disposition, NavigationInterceptor};
use livepane_preview::{PreviewEndpoint, PreviewMessage};
use tracing::debug;

/// The sandbox side of the preview: one applicator, one interceptor, one
/// channel endpoint. Single writer of its live tree.
pub struct PreviewSandbox {
    applicator: PatchApplicator,
    interceptor: NavigationInterceptor,
    endpoint: PreviewEndpoint,
}

impl PreviewSandbox {
    /// Creates a sandbox over its half of the channel.
    pub fn new(endpoint: PreviewEndpoint) -> Self {
        Self {
            applicator: PatchApplicator::new(),
            interceptor: NavigationInterceptor::new(),
            endpoint,
        }
    }

    /// The applicator, for state inspection.
    pub fn applicator(&self) -> &PatchApplicator {
        &self.applicator
    }

    /// Mutable applicator access, for driving transitions directly.
    pub fn applicator_mut(&mut self) -> &mut PatchApplicator {
        &mut self.applicator
    }

    /// Loads the diff engine and reports readiness to the host. The
    /// outbound `initialize` is the engine's cue to start sending updates.
    pub async fn activate(&mut self, loader: &dyn DiffLoader) -> SandboxResult<()> {
        self.applicator.activate(loader).await?;
        self.endpoint.send(PreviewMessage::Initialize);
        Ok(())
    }

    /// Dispatches one inbound message to the applicator.
    pub fn handle_message(&mut self, message: &PreviewMessage) -> ApplyOutcome {
        self.applicator.handle_message(message)
    }

    /// Handles one link activation inside the context. Internal targets
    /// are forwarded to the host; the returned disposition says what the
    /// caller should suppress.
    pub fn handle_link_activation(&self, href: &str) -> Disposition {
        let disposition = self.interceptor.intercept(href);
        if let Disposition::Intercepted(path) = &disposition {
            self.endpoint.send(PreviewMessage::navigate(path.clone()));
        }
        disposition
    }

    /// Drives the sandbox: activates, then applies inbound messages until
    /// the host endpoint goes away.
    pub async fn run(mut self, loader: &dyn DiffLoader) -> SandboxResult<()> {
        self.activate(loader).await?;
        while let Some(message) = self.endpoint.recv().await {
            self.handle_message(&message);
        }
        debug!("host endpoint closed, sandbox stopping");
        Ok(())
    }
}
