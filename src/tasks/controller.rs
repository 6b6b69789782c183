use std::time::Duration;

use anyhow::Result;
use tokio::select;
use tokio::sync::{mpsc::Receiver, watch};
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::ticker::Ticker;
use crate::slideshow::{Action, SlideOrder, SlideshowState};

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub tick_interval: Duration,
    pub order: SlideOrder,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            order: SlideOrder::shuffled(None),
        }
    }
}

/// Owns the slideshow state and applies actions one at a time.
///
/// Rules:
/// - Actions arrive on `actions`; ticks come from the internal [`Ticker`].
/// - Every change bumps the revision, re-arms the ticker and publishes a snapshot on `updates`.
/// - A tick fires only for the revision that armed it; anything older is dropped.
/// - Returns when `cancel` fires or every action sender is gone.
pub async fn run(
    mut actions: Receiver<Action>,
    updates: watch::Sender<SlideshowState>,
    options: ControllerOptions,
    cancel: CancellationToken,
) -> Result<()> {
    let mut controller = Controller::new(options, updates);

    loop {
        let armed = controller.ticker.armed();
        let deadline = armed.map_or_else(Instant::now, |a| a.deadline);

        select! {
            _ = cancel.cancelled() => break,

            maybe_action = actions.recv() => {
                match maybe_action {
                    Some(action) => controller.submit(action),
                    None => {
                        debug!("action channel closed");
                        break;
                    }
                }
            }

            _ = sleep_until(deadline), if armed.is_some() => {
                if let Some(fired) = controller.ticker.take() {
                    controller.fire(fired.revision);
                }
            }
        }
    }

    controller.ticker.disarm();
    debug!(revision = controller.revision, "controller stopped");
    Ok(())
}

struct Controller {
    state: SlideshowState,
    revision: u64,
    order: SlideOrder,
    ticker: Ticker,
    updates: watch::Sender<SlideshowState>,
}

impl Controller {
    fn new(options: ControllerOptions, updates: watch::Sender<SlideshowState>) -> Self {
        let state = updates.borrow().clone();
        let mut ticker = Ticker::new(options.tick_interval);
        ticker.observe(0, &state);
        Self {
            state,
            revision: 0,
            order: options.order,
            ticker,
            updates,
        }
    }

    fn submit(&mut self, action: Action) {
        if let Err(err) = action.check(&self.state) {
            warn!(action = action.kind(), "rejecting action: {err}");
            return;
        }
        self.apply(action);
    }

    fn fire(&mut self, revision: u64) {
        if revision != self.revision {
            debug!(revision, current = self.revision, "discarding stale tick");
            return;
        }
        self.apply(Action::Tick);
    }

    fn apply(&mut self, action: Action) {
        let kind = action.kind();
        let next = self.state.clone().apply(action, &mut self.order);
        if next == self.state {
            debug!(action = kind, "action left state unchanged");
            // An unchanged tick still needs the next second scheduled.
            self.ticker.observe(self.revision, &self.state);
            return;
        }

        self.revision += 1;
        log_transition(kind, &self.state, &next);
        self.state = next;
        self.ticker.observe(self.revision, &self.state);
        self.updates.send_replace(self.state.clone());
    }
}

fn log_transition(kind: &'static str, before: &SlideshowState, after: &SlideshowState) {
    if kind == "tick" && before.current_index() == after.current_index() && after.timer_active() {
        debug!(time_left = after.time_left(), "tick");
        return;
    }
    if after.is_finished() && !before.is_finished() {
        info!(slides = after.len(), "show finished");
        return;
    }
    info!(
        action = kind,
        started = after.is_started(),
        index = after.current_index(),
        time_left = after.time_left(),
        timer_active = after.timer_active(),
        slides = after.len(),
        "slideshow transition"
    );
}
