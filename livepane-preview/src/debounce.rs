//! Trigger debouncing.
//!
//! Four independent event sources feed the engine — selection changes, data
//! refreshes, raw keystrokes, raw pointer clicks. Bursts are coalesced into
//! a single [`Settle`] per quiet window: every trigger restarts the window,
//! and the settle fires one full delay after the last trigger of the burst.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};
use tracing::{debug, trace};

/// Default quiet window between the last trigger and the settle.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);

/// What caused an update trigger. Carries no payload beyond the source
/// tag — a trigger only means "something changed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    /// The host selection changed.
    SelectionChanged,
    /// The store signaled a data refresh.
    DataRefresh,
    /// A raw keystroke in the editing surface.
    Keystroke,
    /// A raw pointer click anywhere in the host.
    PointerClick,
}

/// The coalesced signal emitted after a quiet window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settle {
    /// How many triggers the burst coalesced.
    pub coalesced: usize,
}

/// A cloneable subscription handle feeding the debouncer.
///
/// Each event source owns its own clone; dropping every handle tears the
/// debouncer task down deterministically. No ambient global listeners.
#[derive(Debug, Clone)]
pub struct TriggerHandle {
    tx: mpsc::UnboundedSender<TriggerSource>,
}

impl TriggerHandle {
    /// Fires a trigger. A torn-down debouncer swallows it silently.
    pub fn fire(&self, source: TriggerSource) {
        let _ = self.tx.send(source);
    }
}

/// The trigger debouncer.
pub struct Debouncer;

impl Debouncer {
    /// Spawns the debounce task. Returns the trigger handle and the settle
    /// stream. The task ends when every handle clone is dropped or the
    /// settle receiver goes away.
    pub fn spawn(delay: Duration) -> (TriggerHandle, mpsc::UnboundedReceiver<Settle>) {
        let (trigger_tx, mut trigger_rx) = mpsc::unbounded_channel();
        let (settle_tx, settle_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(source) = trigger_rx.recv().await {
                trace!(?source, "trigger, window opened");
                let mut coalesced = 1;

                let deadline = sleep(delay);
                tokio::pin!(deadline);
                loop {
                    tokio::select! {
                        maybe = trigger_rx.recv() => match maybe {
                            Some(source) => {
                                coalesced += 1;
                                trace!(?source, coalesced, "trigger, window restarted");
                                deadline.as_mut().reset(Instant::now() + delay);
                            }
                            None => {
                                debug!("trigger handles dropped mid-burst, stopping");
                                return;
                            }
                        },
                        () = &mut deadline => break,
                    }
                }

                trace!(coalesced, "settled");
                if settle_tx.send(Settle { coalesced }).is_err() {
                    debug!("settle receiver gone, stopping");
                    return;
                }
            }
            debug!("all trigger handles dropped, stopping");
        });

        (TriggerHandle { tx: trigger_tx }, settle_rx)
    }
}
