use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use image::RgbImage;
use log::{debug, info};

use crate::core::screenshots::{Result, ScreenshotError, ScreenshotSink};

const FILENAME_PREFIX: &str = "screenshot";
const FILENAME_EXTENSION: &str = "png";
const FILENAME_TIME_FORMAT: &str = "%Y%m%d_%H%M%S_%3f";

/// Captures video frames as timestamped image files within the output directory.
#[derive(Debug)]
pub struct ScreenshotService {
    output_directory: PathBuf,
    sink: Box<dyn ScreenshotSink>,
}

impl ScreenshotService {
    /// Create a new screenshot service for the given output directory.
    ///
    /// The directory is created when it doesn't exist yet.
    pub fn new(output_directory: PathBuf, sink: Box<dyn ScreenshotSink>) -> Result<Self> {
        fs::create_dir_all(&output_directory).map_err(|e| {
            ScreenshotError::CreateDirectoryFailed(
                output_directory.display().to_string(),
                e.to_string(),
            )
        })?;
        debug!(
            "Screenshots will be saved to {}",
            output_directory.display()
        );

        Ok(Self {
            output_directory,
            sink,
        })
    }

    /// The directory screenshots are saved into.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Save the given frame as a timestamped image file.
    ///
    /// It returns the path of the saved file on success.
    pub fn capture(&self, frame: &RgbImage) -> Result<PathBuf> {
        let path = self.output_directory.join(Self::filename(&Local::now()));

        self.sink.save(frame, &path)?;
        info!("Saved screenshot to {}", path.display());
        Ok(path)
    }

    fn filename(time: &DateTime<Local>) -> String {
        format!(
            "{}_{}.{}",
            FILENAME_PREFIX,
            time.format(FILENAME_TIME_FORMAT),
            FILENAME_EXTENSION
        )
    }
}
