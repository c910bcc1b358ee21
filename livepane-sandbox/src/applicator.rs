//! The patch applicator: gates and applies incoming markup patches.

use crate::error::SandboxResult;
use crate::loader::DiffLoader;
use livepane_dom::{DiffEngine, LiveNode, parse_body};
use livepane_preview::PreviewMessage;
use tracing::{debug, trace, warn};

/// The placeholder body the context shows until the first patch lands.
const LOADING_MARKUP: &str = "<p>Loading preview...</p>";

/// Readiness of the isolated context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SandboxState {
    /// Nothing has started loading yet.
    Uninitialized,
    /// The diff engine fetch is in flight; patches drop.
    LoadingDiffLibrary,
    /// Patches apply.
    DiffReady,
}

/// Why an incoming message was dropped. All of these are expected races
/// during startup, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The diff engine is not installed yet.
    NotReady,
    /// The live document body is absent.
    NoBody,
    /// The update carried no markup.
    EmptyMarkup,
    /// The markup could not be parsed into a patch target.
    UnparsableMarkup,
}

/// What the applicator did with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The live tree was patched.
    Applied,
    /// The message was dropped with a diagnostic.
    Dropped(DropReason),
    /// The message carries nothing for the applicator.
    Ignored,
}

/// Applies `update` patches to the live tree, once its diff engine has
/// loaded. Messages arriving earlier are dropped, never queued: the host
/// sends fire-and-forget and the next frame supersedes anything missed.
pub struct PatchApplicator {
    state: SandboxState,
    diff: Option<DiffEngine>,
    body: Option<LiveNode>,
    host_initialized: bool,
}

impl Default for PatchApplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl PatchApplicator {
    /// Creates an applicator with nothing loaded.
    pub fn new() -> Self {
        Self {
            state: SandboxState::Uninitialized,
            diff: None,
            body: None,
            host_initialized: false,
        }
    }

    /// Current readiness state.
    pub fn state(&self) -> SandboxState {
        self.state
    }

    /// The live body, once one exists.
    pub fn body(&self) -> Option<&LiveNode> {
        self.body.as_ref()
    }

    /// Whether the host's post-load `initialize` has been seen.
    pub fn host_initialized(&self) -> bool {
        self.host_initialized
    }

    /// Drops the live body, modeling a document torn down between context
    /// teardown and recreation. Subsequent patches drop until a new body
    /// is built by re-activation.
    pub fn clear_body(&mut self) {
        self.body = None;
    }

    /// Marks the diff engine fetch as started.
    pub fn begin_loading(&mut self) {
        if self.state == SandboxState::Uninitialized {
            trace!("diff engine load started");
            self.state = SandboxState::LoadingDiffLibrary;
        }
    }

    /// Installs the loaded diff engine and builds the initial body if none
    /// exists. This is the single authoritative readiness transition.
    pub fn install_diff_engine(&mut self, mut engine: DiffEngine) {
        if self.body.is_none() {
            let target = parse_body(LOADING_MARKUP)
                .unwrap_or_else(|_| livepane_dom::Node::element("body", [], Vec::new()));
            self.body = Some(engine.materialize(&target));
        }
        self.diff = Some(engine);
        self.state = SandboxState::DiffReady;
        debug!("diff engine installed, patches apply from here");
    }

    /// Runs the full activation sequence: begin loading, await the diff
    /// engine, install it.
    pub async fn activate(&mut self, loader: &dyn DiffLoader) -> SandboxResult<()> {
        self.begin_loading();
        let engine = loader.load().await?;
        self.install_diff_engine(engine);
        Ok(())
    }

    /// Handles one message from the host.
    pub fn handle_message(&mut self, message: &PreviewMessage) -> ApplyOutcome {
        match message {
            PreviewMessage::Initialize => {
                trace!("host initialize noted");
                self.host_initialized = true;
                ApplyOutcome::Ignored
            }
            PreviewMessage::Update { html } => self.apply_update(html),
            PreviewMessage::Navigate { .. } => ApplyOutcome::Ignored,
        }
    }

    /// Applies one markup frame, or drops it with a diagnostic when a
    /// precondition fails.
    fn apply_update(&mut self, html: &str) -> ApplyOutcome {
        if self.state != SandboxState::DiffReady {
            debug!("update skipped: diff engine not ready");
            return ApplyOutcome::Dropped(DropReason::NotReady);
        }
        let Some(body) = self.body.as_mut() else {
            debug!("update skipped: document body is absent");
            return ApplyOutcome::Dropped(DropReason::NoBody);
        };
        if html.is_empty() {
            debug!("update skipped: empty markup");
            return ApplyOutcome::Dropped(DropReason::EmptyMarkup);
        }

        let target = match parse_body(html) {
            Ok(target) => target,
            Err(e) => {
                warn!("update skipped: markup did not parse: {e}");
                return ApplyOutcome::Dropped(DropReason::UnparsableMarkup);
            }
        };

        let diff = self
            .diff
            .as_mut()
            .expect("DiffReady implies an installed engine");
        diff.reconcile(body, &target);
        trace!("patch applied");
        ApplyOutcome::Applied
    }
}
