use std::sync::Arc;

use super::action::Action;
use super::shuffle::SlideOrder;
use super::slide::{ImageRef, SlideDuration, SlideEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the show starts; durations may be edited.
    Configuring,
    /// Slides are shown in shuffled order with the countdown driving advancement.
    Running,
}

/// Complete slideshow state. Each transition consumes one value and yields the next.
///
/// Invariants held after every transition:
/// - a started show is never empty and `current_index < len()`;
/// - `timer_active` is false whenever the show has not started;
/// - durations never change while the show is running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideshowState {
    slides: Arc<Vec<SlideEntry>>,
    started: bool,
    current_index: usize,
    time_left: u32,
    timer_active: bool,
}

impl SlideshowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action. Requests that do not fit the current state leave it unchanged.
    #[must_use]
    pub fn apply(self, action: Action, order: &mut SlideOrder) -> Self {
        match action {
            Action::Replace(images) => self.replace(images),
            Action::SetDuration { index, duration } => self.set_duration(index, duration),
            Action::Start => self.start(order),
            Action::Tick => self.tick(),
            Action::Next if self.started && !self.is_at_end() => {
                let next = self.current_index + 1;
                self.show(next)
            }
            Action::Previous if self.started && !self.is_at_start() => {
                let previous = self.current_index - 1;
                self.show(previous)
            }
            Action::Next | Action::Previous => self,
            Action::StopTimer => Self {
                timer_active: false,
                ..self
            },
            Action::RestartTimer if self.started => {
                let index = self.current_index;
                self.show(index)
            }
            Action::RestartTimer => self,
        }
    }

    fn replace(self, images: Vec<ImageRef>) -> Self {
        let slides = images
            .into_iter()
            .map(|image| SlideEntry::new(image, SlideDuration::DEFAULT))
            .collect();
        Self {
            slides: Arc::new(slides),
            ..Self::default()
        }
    }

    fn set_duration(mut self, index: usize, duration: SlideDuration) -> Self {
        if self.started {
            return self;
        }
        debug_assert!(
            index < self.slides.len(),
            "slide index {index} out of range for {} slides",
            self.slides.len()
        );
        if let Some(entry) = Arc::make_mut(&mut self.slides).get_mut(index) {
            entry.duration = duration;
        }
        self
    }

    fn start(mut self, order: &mut SlideOrder) -> Self {
        if self.slides.is_empty() {
            return self;
        }
        order.arrange(Arc::make_mut(&mut self.slides).as_mut_slice());
        Self {
            started: true,
            ..self.show(0)
        }
    }

    fn tick(mut self) -> Self {
        if !self.countdown_active() {
            return self;
        }
        if self.time_left > 0 {
            self.time_left -= 1;
            self
        } else if !self.is_at_end() {
            let next = self.current_index + 1;
            self.show(next)
        } else {
            self.timer_active = false;
            self
        }
    }

    /// Move to `index` with a full countdown running.
    fn show(self, index: usize) -> Self {
        let time_left = self.slides[index].duration.as_secs();
        Self {
            current_index: index,
            time_left,
            timer_active: true,
            ..self
        }
    }

    pub fn slides(&self) -> &[SlideEntry] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn phase(&self) -> Phase {
        if self.started {
            Phase::Running
        } else {
            Phase::Configuring
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Seconds remaining on the current slide.
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn timer_active(&self) -> bool {
        self.timer_active
    }

    /// Whether a scheduler should be delivering ticks.
    pub fn countdown_active(&self) -> bool {
        self.started && self.timer_active
    }

    /// The slide on screen, once the show has started.
    pub fn current_slide(&self) -> Option<&SlideEntry> {
        if self.started {
            self.slides.get(self.current_index)
        } else {
            None
        }
    }

    pub fn is_at_start(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.current_index + 1 >= self.slides.len()
    }

    pub fn is_time_up(&self) -> bool {
        self.started && self.time_left == 0
    }

    /// The last slide ran out and the countdown stopped.
    pub fn is_finished(&self) -> bool {
        self.is_time_up() && self.is_at_end() && !self.timer_active
    }
}
