use std::fmt::Debug;
use std::path::Path;

use image::RgbImage;
#[cfg(test)]
use mockall::automock;

use crate::core::screenshots::{Result, ScreenshotError};

/// Writes captured frames to their destination.
#[cfg_attr(test, automock)]
pub trait ScreenshotSink: Debug {
    /// Write the given frame to the given path.
    fn save(&self, frame: &RgbImage, path: &Path) -> Result<()>;
}

/// Saves captured frames as image files, with the format derived from the
/// path extension.
#[derive(Debug, Default)]
pub struct ImageFileSink;

impl ScreenshotSink for ImageFileSink {
    fn save(&self, frame: &RgbImage, path: &Path) -> Result<()> {
        frame
            .save(path)
            .map_err(|e| ScreenshotError::SaveFailed(path.display().to_string(), e.to_string()))
    }
}
