use std::fmt::Debug;
use std::time::Duration;

use image::RgbImage;
#[cfg(test)]
use mockall::automock;

/// Provides decoded video frames in presentation order.
#[cfg_attr(test, automock)]
pub trait MediaSource: Debug {
    /// Pull the next decoded frame of the video.
    ///
    /// It returns [None] when the end of the video has been reached.
    fn next_frame(&mut self) -> Option<RgbImage>;

    /// The presentation time of the most recently pulled frame.
    fn position(&self) -> Duration;

    /// The frame rate of the video stream.
    ///
    /// A non-positive value indicates that the frame rate is unknown.
    fn frame_rate(&self) -> f32;
}
