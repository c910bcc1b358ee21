//! Fire-and-forget message endpoints.
//!
//! Models the cross-context message transport: two endpoints joined by a
//! pair of unbounded in-process queues. Sending never blocks and never
//! fails — a departed peer means the message is dropped, which is exactly
//! the delivery guarantee the engine is designed around. Order is preserved
//! per direction, nothing is guaranteed across directions.

use crate::protocol::PreviewMessage;
use tokio::sync::mpsc;
use tracing::debug;

/// One side of the isolation boundary.
pub struct PreviewEndpoint {
    tx: mpsc::UnboundedSender<PreviewMessage>,
    rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<PreviewMessage>>,
}

/// Creates a connected endpoint pair: `(host, sandbox)`.
pub fn pair() -> (PreviewEndpoint, PreviewEndpoint) {
    let (host_tx, sandbox_rx) = mpsc::unbounded_channel();
    let (sandbox_tx, host_rx) = mpsc::unbounded_channel();

    let host = PreviewEndpoint {
        tx: host_tx,
        rx: tokio::sync::Mutex::new(host_rx),
    };
    let sandbox = PreviewEndpoint {
        tx: sandbox_tx,
        rx: tokio::sync::Mutex::new(sandbox_rx),
    };

    (host, sandbox)
}

impl PreviewEndpoint {
    /// Posts a message to the peer. Fire-and-forget: if the peer is gone
    /// the message is dropped with a diagnostic.
    pub fn send(&self, message: PreviewMessage) {
        if self.tx.send(message).is_err() {
            debug!("peer endpoint gone, message dropped");
        }
    }

    /// Receives the next message. Returns `None` once the peer endpoint
    /// is dropped and the queue is drained.
    pub async fn recv(&self) -> Option<PreviewMessage> {
        self.rx.lock().await.recv().await
    }

    /// Non-blocking receive, for synchronous draining in tests and
    /// single-threaded drive loops.
    pub fn try_recv(&self) -> Option<PreviewMessage> {
        self.rx
            .try_lock()
            .ok()
            .and_then(|mut rx| rx.try_recv().ok())
    }
}
