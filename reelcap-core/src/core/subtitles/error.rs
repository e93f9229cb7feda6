use thiserror::Error;

/// The specialized subtitle result.
pub type Result<T> = std::result::Result<T, SubtitleError>;

/// Represents errors specific to subtitle handling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubtitleError {
    /// Failed to read the subtitle file from disk.
    #[error("Failed to read subtitle file {0}: {1}")]
    ReadFailed(String, String),
    /// The timecode value doesn't follow the `HH:MM:SS,mmm` shape.
    #[error("Invalid timecode format: {0}")]
    InvalidTimecode(String),
}
