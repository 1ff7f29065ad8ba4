//! Tokio-backed [`TimerService`] implementation.
//!
//! Each scheduled timeout runs as a spawned `tokio::time::sleep` task that
//! delivers its [`TimerHandle`] over an unbounded channel when it fires.
//! The embedder receives handles from the channel and calls
//! [`TokioTimerService::acknowledge`] before dispatching the timeout to
//! the session; a handle cancelled after its task had already fired is
//! acknowledged as dead and must be dropped.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::adapter::{TimerHandle, TimerService};

/// Handle-based timer service running on the current tokio runtime.
#[derive(Debug)]
pub struct TokioTimerService {
    next_id: u64,
    fired_tx: UnboundedSender<TimerHandle>,
    pending: HashMap<u64, JoinHandle<()>>,
}

impl TokioTimerService {
    /// Create a timer service and the channel on which fired handles are
    /// delivered.
    #[must_use]
    pub fn new() -> (Self, UnboundedReceiver<TimerHandle>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        (
            Self {
                next_id: 0,
                fired_tx,
                pending: HashMap::new(),
            },
            fired_rx,
        )
    }

    /// Confirm that a fired handle is still live, and retire it.
    ///
    /// Returns `false` for handles cancelled after their task had already
    /// fired; such deliveries must not reach the session.
    pub fn acknowledge(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&handle.id()).is_some()
    }
}

impl TimerService for TokioTimerService {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle::new(self.next_id);
        self.next_id += 1;

        let fired_tx = self.fired_tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver may be gone during shutdown.
            let _ = fired_tx.send(handle);
        });
        self.pending.insert(handle.id(), task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.pending.remove(&handle.id()) {
            task.abort();
        }
    }
}
