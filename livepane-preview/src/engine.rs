//! The preview synchronization engine.
//!
//! The engine is the single writer of the projection snapshot and the
//! rendered markup. Each settle runs one cycle — reload, render, ship —
//! in that order; cycles are serialized by the drive loop, and queued
//! settles are coalesced so only the newest data is ever published.

use crate::channel::PreviewEndpoint;
use crate::debounce::{DEFAULT_DEBOUNCE, Debouncer, Settle, TriggerHandle, TriggerSource};
use crate::loader::{Projection, ProjectionLoader};
use crate::protocol::PreviewMessage;
use crate::render::ContentRenderer;
use livepane_store::RecordStore;
use livepane_types::SelectionState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

/// Configuration for the preview engine.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Quiet window for trigger debouncing.
    pub debounce: Duration,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Host-side view of the isolated context's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// No isolated context exists yet.
    NoContext,
    /// The context was created and is running its own setup.
    Loading,
    /// The context reported readiness; updates flow.
    Ready,
}

/// The preview synchronization engine.
pub struct PreviewEngine {
    loader: ProjectionLoader,
    renderer: Arc<dyn ContentRenderer>,
    endpoint: PreviewEndpoint,
    trigger: TriggerHandle,
    settle_rx: Option<mpsc::UnboundedReceiver<Settle>>,
    selection: SelectionState,
    channel_state: ChannelState,
    last_markup: String,
    cycle: u64,
    navigation_misses: usize,
}

impl PreviewEngine {
    /// Creates an engine over the given store, renderer and host endpoint.
    /// Must be called inside a tokio runtime (the debouncer task spawns
    /// immediately).
    pub fn new(
        store: Arc<dyn RecordStore>,
        renderer: Arc<dyn ContentRenderer>,
        endpoint: PreviewEndpoint,
        config: PreviewConfig,
    ) -> Self {
        let (trigger, settle_rx) = Debouncer::spawn(config.debounce);
        Self {
            loader: ProjectionLoader::new(store),
            renderer,
            endpoint,
            trigger,
            settle_rx: Some(settle_rx),
            selection: SelectionState::new(),
            channel_state: ChannelState::NoContext,
            last_markup: String::new(),
            cycle: 0,
            navigation_misses: 0,
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    /// A trigger handle for an event source (keystrokes, clicks, refresh).
    /// Clones are cheap; each source owns its own.
    pub fn trigger_handle(&self) -> TriggerHandle {
        self.trigger.clone()
    }

    /// The current selection.
    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// The host channel state.
    pub fn channel_state(&self) -> ChannelState {
        self.channel_state
    }

    /// The markup produced by the most recent render, empty after a
    /// render failure.
    pub fn last_markup(&self) -> &str {
        &self.last_markup
    }

    /// The current projection snapshot.
    pub fn projection(&self) -> Arc<Projection> {
        self.loader.snapshot()
    }

    /// Count of navigation messages whose target matched no record.
    pub fn navigation_misses(&self) -> usize {
        self.navigation_misses
    }

    // ── Host-driven state changes ────────────────────────────────

    /// Updates the selection and fires a trigger for the next cycle.
    pub fn set_selection(&mut self, selection: SelectionState) {
        self.selection = selection;
        self.trigger.fire(TriggerSource::SelectionChanged);
    }

    /// Marks the isolated context as created: the channel moves to
    /// `Loading` and the post-load `initialize` handshake is sent. Safe to
    /// call again when the context is torn down and recreated.
    pub fn attach_sandbox(&mut self) {
        debug!("sandbox attached, handshake sent");
        self.channel_state = ChannelState::Loading;
        self.endpoint.send(PreviewMessage::Initialize);
    }

    // ── Message handling ─────────────────────────────────────────

    /// Handles one message arriving from the sandbox.
    pub async fn handle_message(&mut self, message: PreviewMessage) {
        match message {
            PreviewMessage::Initialize => {
                if self.channel_state != ChannelState::Ready {
                    info!("sandbox reported ready");
                    self.channel_state = ChannelState::Ready;
                    // Run one immediate cycle so the frame rendered before
                    // the handshake completed is not lost.
                    self.handle_settle().await;
                } else {
                    debug!("duplicate initialize from sandbox ignored");
                }
            }
            PreviewMessage::Navigate { path } => self.resolve_navigation(&path),
            PreviewMessage::Update { .. } => {
                debug!("update message on host side ignored");
            }
        }
    }

    /// Resolves a forwarded link target against the current snapshot.
    /// A match rebinds both selection fields and fires a trigger; a miss
    /// is logged and changes nothing.
    fn resolve_navigation(&mut self, path: &str) {
        let name = path.strip_prefix('/').unwrap_or(path);
        let snapshot = self.loader.snapshot();

        let mut matches = snapshot.values().filter(|record| record.name == name);
        match matches.next() {
            Some(record) => {
                if matches.next().is_some() {
                    debug!(name, "multiple records share the link target name");
                }
                debug!(name, id = %record.id, "navigation resolved");
                self.selection.select(record.id);
                self.trigger.fire(TriggerSource::SelectionChanged);
            }
            None => {
                warn!(path, "navigation target not found");
                self.navigation_misses += 1;
            }
        }
    }

    // ── Cycle execution ──────────────────────────────────────────

    /// Runs one synchronization cycle: reload the projection, render the
    /// selected record, ship the markup. Every failure class degrades
    /// without escaping.
    pub async fn handle_settle(&mut self) {
        self.cycle += 1;
        let cycle = self.cycle;

        if !self.loader.store_ready() || !self.renderer.available() {
            debug!(cycle, "upstream not ready, cycle skipped");
            return;
        }

        let projection = self.loader.reload().await;

        let Some(content_id) = self.selection.content_id else {
            trace!(cycle, "no content selection, render skipped");
            return;
        };

        match self.renderer.render(content_id, &projection) {
            Ok(markup) => {
                trace!(cycle, bytes = markup.len(), "rendered");
                self.last_markup = markup;
                if self.channel_state == ChannelState::Ready {
                    self.endpoint
                        .send(PreviewMessage::update(self.last_markup.clone()));
                }
            }
            Err(e) => {
                warn!(cycle, "render failed, preview cleared: {e}");
                self.last_markup.clear();
            }
        }
    }

    // ── Drive loop ───────────────────────────────────────────────

    /// Drives the engine: settles run cycles, sandbox messages are
    /// dispatched. Queued settles are coalesced before each cycle so a
    /// slow cycle never publishes data older than the latest settle.
    /// Returns when either the settle stream or the channel closes.
    pub async fn run(mut self) {
        let mut settle_rx = self
            .settle_rx
            .take()
            .expect("run may only be called once");

        loop {
            enum Step {
                Settle,
                Message(PreviewMessage),
                Closed,
            }

            let step = tokio::select! {
                maybe = settle_rx.recv() => match maybe {
                    Some(_) => {
                        // Collapse the backlog; only the newest settle matters.
                        while settle_rx.try_recv().is_ok() {}
                        Step::Settle
                    }
                    None => Step::Closed,
                },
                maybe = self.endpoint.recv() => match maybe {
                    Some(message) => Step::Message(message),
                    None => Step::Closed,
                },
            };

            match step {
                Step::Settle => self.handle_settle().await,
                Step::Message(message) => self.handle_message(message).await,
                Step::Closed => {
                    debug!("engine feed closed, stopping");
                    break;
                }
            }
        }
    }
}
