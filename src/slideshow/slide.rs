use std::fmt;
use std::num::NonZeroU32;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Error;

/// Handle to a displayable image plus the name shown for it.
///
/// Cloning is cheap; the path and name are shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    path: Arc<Path>,
    name: Arc<str>,
    dimensions: Option<(u32, u32)>,
}

impl ImageRef {
    /// Build a handle named after the file name of `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::with_name(path, name)
    }

    pub fn with_name(path: impl AsRef<Path>, name: impl Into<Arc<str>>) -> Self {
        Self {
            path: Arc::from(path.as_ref()),
            name: name.into(),
            dimensions: None,
        }
    }

    #[must_use]
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some((width, height));
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pixel size as reported by the image source, if it probed the file.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }
}

const fn secs(value: u32) -> SlideDuration {
    match NonZeroU32::new(value) {
        Some(v) => SlideDuration(v),
        None => panic!("slide duration must be positive"),
    }
}

/// How long a slide stays on screen, in whole seconds. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlideDuration(NonZeroU32);

impl SlideDuration {
    pub const DEFAULT: Self = secs(60);

    /// Choices offered by the configuration surface.
    pub const PRESETS: [Self; 5] = [secs(30), secs(60), secs(120), secs(300), secs(600)];

    /// Returns `None` for zero.
    pub const fn from_secs(seconds: u32) -> Option<Self> {
        match NonZeroU32::new(seconds) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    pub const fn as_secs(self) -> u32 {
        self.0.get()
    }

    pub fn is_preset(self) -> bool {
        Self::PRESETS.contains(&self)
    }

    /// Human label used when listing duration choices, e.g. "2 minutes".
    pub fn label(self) -> String {
        match self.as_secs() {
            60 => "1 minute".to_string(),
            s if s % 60 == 0 => format!("{} minutes", s / 60),
            s => format!("{s} seconds"),
        }
    }
}

impl Default for SlideDuration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SlideDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.as_secs();
        write!(f, "{}:{:02}", s / 60, s % 60)
    }
}

impl TryFrom<Duration> for SlideDuration {
    type Error = Error;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        if value.subsec_nanos() != 0 {
            return Err(Error::InvalidDuration(format!(
                "{} is not a whole number of seconds",
                humantime::format_duration(value)
            )));
        }
        let seconds = u32::try_from(value.as_secs())
            .map_err(|_| Error::InvalidDuration(format!("{}s is too long", value.as_secs())))?;
        Self::from_secs(seconds).ok_or_else(|| Error::InvalidDuration("0s".to_string()))
    }
}

impl From<SlideDuration> for Duration {
    fn from(value: SlideDuration) -> Self {
        Duration::from_secs(u64::from(value.as_secs()))
    }
}

/// One image paired with its display duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideEntry {
    pub image: ImageRef,
    pub duration: SlideDuration,
}

impl SlideEntry {
    pub fn new(image: ImageRef, duration: SlideDuration) -> Self {
        Self { image, duration }
    }
}
