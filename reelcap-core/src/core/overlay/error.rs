use thiserror::Error;

/// The specialized overlay result.
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Represents errors specific to the caption overlay.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OverlayError {
    /// No usable font could be found on the system.
    #[error("No usable system font could be found")]
    NoFontAvailable,
    /// The font data couldn't be loaded.
    #[error("Failed to load font: {0}")]
    FontLoadFailed(String),
}
