use thiserror::Error;

/// Library error type for slideshow operations.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more configured photo directories are invalid or unreadable.
    #[error("invalid photo directory: {0}")]
    BadDir(String),

    /// A slide duration that is zero or not a whole number of seconds.
    #[error("invalid slide duration: {0}")]
    InvalidDuration(String),

    /// A slide index outside the current collection.
    #[error("slide index {index} out of range for {len} slides")]
    SlideIndex { index: usize, len: usize },

    /// Text command that does not name any known action.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Text command with missing or malformed arguments.
    #[error("invalid argument for {command}: {reason}")]
    InvalidArgument {
        command: &'static str,
        reason: String,
    },

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML/serde configuration error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),
}
