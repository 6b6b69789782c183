//! Slideshow state machine: slide collection, shuffle-on-start and countdown.
//!
//! Nothing here knows about real time. A scheduler watches
//! [`SlideshowState::countdown_active`] and feeds [`Action::Tick`] once per second.

mod action;
mod shuffle;
mod slide;
mod state;

pub use action::Action;
pub use shuffle::{SlideOrder, fisher_yates};
pub use slide::{ImageRef, SlideDuration, SlideEntry};
pub use state::{Phase, SlideshowState};
