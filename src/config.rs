use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::error::Error;
use crate::scan::ScanOptions;
use crate::slideshow::{Action, ImageRef, SlideDuration, SlideOrder, SlideshowState};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Configuration {
    /// Root directory to scan for images.
    pub photo_library_path: PathBuf,
    /// Whether to descend into subdirectories.
    pub recursive: bool,
    /// Optional maximum recursion depth. `None` or `0` means unlimited.
    pub max_depth: Option<usize>,
    /// Read image headers during the scan and skip files that cannot be decoded.
    pub probe_images: bool,
    /// Duration given to every slide unless overridden.
    #[serde(with = "humantime_serde")]
    pub default_duration: Duration,
    /// Per-file overrides, keyed by file name.
    pub durations: BTreeMap<String, humantime_serde::Serde<Duration>>,
    /// Only accept the preset durations (30s, 1m, 2m, 5m, 10m).
    pub restrict_durations: bool,
    /// Shuffle on start; insertion (path) order otherwise.
    pub shuffle: bool,
    /// Optional deterministic seed for the shuffle.
    pub shuffle_seed: Option<u64>,
    /// Countdown granularity. One second unless testing.
    #[serde(with = "humantime_serde")]
    pub tick_interval: Duration,
    /// Start the show as soon as images are loaded.
    pub autostart: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            photo_library_path: PathBuf::from("."),
            recursive: true,
            max_depth: None,
            probe_images: true,
            default_duration: SlideDuration::DEFAULT.into(),
            durations: BTreeMap::new(),
            restrict_durations: false,
            shuffle: true,
            shuffle_seed: None,
            tick_interval: Duration::from_secs(1),
            autostart: false,
        }
    }
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            !self.tick_interval.is_zero(),
            "tick-interval must be greater than zero"
        );
        ensure!(
            !self.photo_library_path.as_os_str().is_empty(),
            "photo-library-path must not be empty"
        );
        self.slide_duration(self.default_duration)
            .context("invalid default-duration")?;
        for (name, duration) in &self.durations {
            self.slide_duration(**duration)
                .with_context(|| format!("invalid duration for {name}"))?;
        }
        Ok(self)
    }

    /// Duration for the slide showing `file_name`.
    pub fn duration_for(&self, file_name: &str) -> Result<SlideDuration> {
        let raw = self
            .durations
            .get(file_name)
            .map(|d| **d)
            .unwrap_or(self.default_duration);
        self.slide_duration(raw)
    }

    fn slide_duration(&self, raw: Duration) -> Result<SlideDuration> {
        let duration = SlideDuration::try_from(raw)?;
        if self.restrict_durations {
            ensure!(
                duration.is_preset(),
                "{} is not one of the offered durations (30s, 1m, 2m, 5m, 10m)",
                humantime::format_duration(raw)
            );
        }
        Ok(duration)
    }

    /// Configuration-phase state for `images` with the configured durations applied.
    pub fn initial_state(&self, images: Vec<ImageRef>) -> Result<SlideshowState> {
        let durations = images
            .iter()
            .map(|image| self.duration_for(image.name()))
            .collect::<Result<Vec<_>>>()?;
        let mut order = SlideOrder::Insertion;
        let mut state = SlideshowState::new().apply(Action::Replace(images), &mut order);
        for (index, duration) in durations.into_iter().enumerate() {
            if duration != SlideDuration::DEFAULT {
                state = state.apply(Action::SetDuration { index, duration }, &mut order);
            }
        }
        Ok(state)
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            recursive: self.recursive,
            max_depth: self.max_depth,
            probe: self.probe_images,
            ..ScanOptions::default()
        }
    }

    pub fn slide_order(&self) -> SlideOrder {
        if self.shuffle {
            SlideOrder::shuffled(self.shuffle_seed)
        } else {
            SlideOrder::Insertion
        }
    }
}
