use std::path::PathBuf;

use derive_more::Display;
use serde::{Deserialize, Serialize};

const DEFAULT_FALLBACK_FRAME_RATE: fn() -> f32 = || 25.0;
const DEFAULT_OUTPUT_DIRECTORY: fn() -> PathBuf = || PathBuf::from("screenshots");

/// The playback settings of the application.
#[derive(Debug, Display, Clone, Serialize, Deserialize, PartialEq)]
#[display("fallback_frame_rate: {}", fallback_frame_rate)]
pub struct PlaybackSettings {
    /// The frame rate to use when the media source reports a non-positive rate
    #[serde(default = "DEFAULT_FALLBACK_FRAME_RATE")]
    pub fallback_frame_rate: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            fallback_frame_rate: DEFAULT_FALLBACK_FRAME_RATE(),
        }
    }
}

/// The screenshot capture settings of the application.
#[derive(Debug, Display, Clone, Serialize, Deserialize, PartialEq)]
#[display("output_directory: {:?}", output_directory)]
pub struct CaptureSettings {
    /// The directory in which screenshots will be stored
    #[serde(default = "DEFAULT_OUTPUT_DIRECTORY")]
    pub output_directory: PathBuf,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            output_directory: DEFAULT_OUTPUT_DIRECTORY(),
        }
    }
}
