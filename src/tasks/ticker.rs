use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

use crate::slideshow::SlideshowState;

/// A pending one-shot tick, bound to the state revision that requested it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Armed {
    pub revision: u64,
    pub deadline: Instant,
}

/// Countdown scheduler.
///
/// Holds at most one deadline. Every new revision of a state with an active
/// countdown replaces it with a fresh one a full interval away, and a state
/// without an active countdown clears it.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    armed: Option<Armed>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            armed: None,
        }
    }

    /// Re-arm or disarm after the controller published `revision`.
    pub fn observe(&mut self, revision: u64, state: &SlideshowState) {
        if !state.countdown_active() {
            if let Some(old) = self.armed.take() {
                trace!(revision = old.revision, "tick disarmed");
            }
            return;
        }
        if self.armed.is_some_and(|a| a.revision == revision) {
            return;
        }
        let deadline = Instant::now() + self.interval;
        trace!(revision, "tick armed");
        self.armed = Some(Armed { revision, deadline });
    }

    pub fn armed(&self) -> Option<Armed> {
        self.armed
    }

    /// Clear the pending deadline once it has fired.
    pub fn take(&mut self) -> Option<Armed> {
        self.armed.take()
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }
}
