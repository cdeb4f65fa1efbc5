//! Per-monster ownership of in-flight presentation timers.

use tokio::sync::watch;
use tokio::task::AbortHandle;

/// Timers and the busy signal belonging to one spawned monster.
///
/// Dropping the lifetime aborts every pending timer and closes the busy
/// signal, which releases anyone still waiting on it.
///
/// The discard timer is held apart from the presentation beats so that
/// cancelling a stuck sequence never cancels the fade-out of a dead monster.
pub(crate) struct InstanceLifetime {
    timers: Vec<AbortHandle>,
    discard: Option<AbortHandle>,
    busy: watch::Sender<bool>,
}

impl InstanceLifetime {
    /// A freshly spawned monster is busy until its appearance completes.
    pub(crate) fn new() -> Self {
        Self {
            timers: Vec::new(),
            discard: None,
            busy: watch::channel(true).0,
        }
    }

    pub(crate) fn track(&mut self, timer: AbortHandle) {
        self.timers.retain(|handle| !handle.is_finished());
        self.timers.push(timer);
    }

    pub(crate) fn discard_scheduled(&self) -> bool {
        self.discard.is_some()
    }

    pub(crate) fn track_discard(&mut self, timer: AbortHandle) {
        if let Some(previous) = self.discard.replace(timer) {
            previous.abort();
        }
    }

    /// Aborts pending presentation timers without closing the busy signal.
    /// A scheduled discard survives.
    pub(crate) fn cancel_timers(&mut self) {
        for timer in self.timers.drain(..) {
            timer.abort();
        }
    }

    /// Publishes the busy flag; subscribers are only woken on a change.
    pub(crate) fn set_busy(&self, busy: bool) {
        self.busy.send_if_modified(|current| {
            let changed = *current != busy;
            *current = busy;
            changed
        });
    }

    pub(crate) fn busy_signal(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }
}

impl Drop for InstanceLifetime {
    fn drop(&mut self) {
        self.cancel_timers();
        if let Some(discard) = self.discard.take() {
            discard.abort();
        }
    }
}
