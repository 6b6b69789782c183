use crate::error::Error;

use super::slide::{ImageRef, SlideDuration};
use super::state::SlideshowState;

/// Transitions accepted by [`SlideshowState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Install a new image set with default durations and return to configuration.
    Replace(Vec<ImageRef>),
    /// Change one slide's duration. Ignored once the show has started.
    SetDuration {
        index: usize,
        duration: SlideDuration,
    },
    /// Shuffle and begin from the first slide. Submitting it while running restarts the show.
    Start,
    /// One elapsed second of countdown.
    Tick,
    Next,
    Previous,
    /// Pause the countdown on the current slide.
    StopTimer,
    /// Reload the current slide's full duration and resume counting.
    RestartTimer,
}

impl Action {
    /// Caller-side precondition check.
    ///
    /// The state machine never fails; a request it cannot honour is a no-op.
    /// An out-of-range slide index is a caller bug though, so anything that
    /// builds actions from user input runs this before submitting.
    pub fn check(&self, state: &SlideshowState) -> Result<(), Error> {
        match self {
            Self::SetDuration { index, .. } if *index >= state.len() => Err(Error::SlideIndex {
                index: *index,
                len: state.len(),
            }),
            _ => Ok(()),
        }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Replace(_) => "replace",
            Self::SetDuration { .. } => "set-duration",
            Self::Start => "start",
            Self::Tick => "tick",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::StopTimer => "stop-timer",
            Self::RestartTimer => "restart-timer",
        }
    }
}
