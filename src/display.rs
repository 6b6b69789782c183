//! Text renderings of a slideshow snapshot for the terminal presenter.

use std::fmt;

use crate::slideshow::{Phase, SlideshowState};

/// Countdown text: `m:ss` while time remains.
pub fn format_countdown(seconds: u32) -> String {
    if seconds == 0 {
        "Time is up!".to_string()
    } else {
        format!("{}:{:02}", seconds / 60, seconds % 60)
    }
}

/// "Image i of n", 1-based.
pub fn format_position(state: &SlideshowState) -> String {
    format!("Image {} of {}", state.current_index() + 1, state.len())
}

/// Analog clock reading for a countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockFace {
    /// Hand angle in degrees, sweeping once per minute.
    pub hand_degrees: f32,
    /// Whole minutes while at least one remains, otherwise seconds.
    pub center: u32,
}

impl ClockFace {
    pub fn for_seconds(seconds: u32) -> Self {
        let minutes = seconds / 60;
        let secs = seconds % 60;
        Self {
            hand_degrees: secs as f32 / 60.0 * 360.0,
            center: if minutes > 0 { minutes } else { secs },
        }
    }

    /// Nearest of eight arrows to the hand's direction, clockwise from twelve.
    pub fn hand_glyph(&self) -> char {
        const HANDS: [char; 8] = ['↑', '↗', '→', '↘', '↓', '↙', '←', '↖'];
        let sector = ((self.hand_degrees + 22.5) / 45.0) as usize;
        HANDS[sector % HANDS.len()]
    }
}

impl fmt::Display for ClockFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}{}]", self.hand_glyph(), self.center)
    }
}

/// One status line describing `state`.
pub fn status_line(state: &SlideshowState) -> String {
    match state.phase() {
        Phase::Configuring if state.is_empty() => "no images loaded".to_string(),
        Phase::Configuring => format!(
            "{} images ready; type 'start' to begin, 'list' to review durations",
            state.len()
        ),
        Phase::Running => {
            let name = state
                .current_slide()
                .map(|slide| slide.image.name())
                .unwrap_or_default();
            let clock = match state.time_left() {
                0 => String::new(),
                secs => format!(" {}", ClockFace::for_seconds(secs)),
            };
            let suffix = if state.is_finished() {
                " (show finished)"
            } else if !state.timer_active() {
                " (paused)"
            } else {
                ""
            };
            format!(
                "{} - {} - {}{}{}",
                format_position(state),
                name,
                format_countdown(state.time_left()),
                clock,
                suffix
            )
        }
    }
}

/// Numbered slide listing with durations, used by the `list` command.
pub fn slide_listing(state: &SlideshowState) -> Vec<String> {
    state
        .slides()
        .iter()
        .enumerate()
        .map(|(idx, slide)| {
            format!(
                "{:>3}. {} [{}]",
                idx + 1,
                slide.image.name(),
                slide.duration.label()
            )
        })
        .collect()
}
