use thiserror::Error;

/// The screenshot specific result type.
pub type Result<T> = std::result::Result<T, ScreenshotError>;

/// The errors that can occur while capturing screenshots.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScreenshotError {
    /// No decoded frame was available to capture.
    #[error("No frame is available to capture")]
    NoFrameAvailable,
    /// The output directory couldn't be created.
    #[error("Failed to create screenshot directory {0}: {1}")]
    CreateDirectoryFailed(String, String),
    /// The frame couldn't be written to disk.
    #[error("Failed to save screenshot to {0}: {1}")]
    SaveFailed(String, String),
}
