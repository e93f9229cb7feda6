use thiserror::Error;

/// The application specific result type.
pub type Result<T> = std::result::Result<T, PlayerError>;

/// The errors that can occur while running the player.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlayerError {
    /// The given video file doesn't exist.
    #[error("Video file {0} does not exist")]
    VideoNotFound(String),
    /// The video couldn't be opened for decoding.
    #[error("Failed to open video {0}: {1}")]
    OpenFailed(String, String),
    /// The screenshot storage couldn't be prepared.
    #[error("Failed to prepare the screenshot storage: {0}")]
    StorageFailed(String),
    /// The player window couldn't be run.
    #[error("Failed to run the player window: {0}")]
    Window(String),
}
