use thiserror::Error;

/// Result type for pattern engine operations
pub type Result<T> = std::result::Result<T, PatternError>;

/// Errors raised while planning a pattern
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The composed message does not fit the display window
    #[error("Message \"{message}\" is too wide ({width} weeks, the window shows {max})")]
    MessageTooWide {
        message: String,
        width: usize,
        max: usize,
    },

    /// Nothing in the message maps to a glyph
    #[error("Message has no supported characters")]
    EmptyMessage,

    /// Commits per active day must be at least one
    #[error("Invalid commits per active day: {0} (must be >= 1)")]
    InvalidCommitsPerDay(u32),

    /// Intensity name not in the level table
    #[error("Unknown intensity level: {0}")]
    UnknownIntensity(String),

    /// Date could not be parsed or is out of range
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Grid rows are missing or have different lengths
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),
}
