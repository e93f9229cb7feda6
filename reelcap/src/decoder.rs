use std::fmt;
use std::fmt::{Debug, Formatter};
use std::path::Path;
use std::time::Duration;

use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::{ffmpeg_is_installed, FfmpegCommand};
use ffmpeg_sidecar::event::{FfmpegEvent, OutputVideoFrame};
use ffmpeg_sidecar::iter::FfmpegIterator;
use image::RgbImage;
use log::{debug, info, trace, warn};

use reelcap_core::core::playback::MediaSource;

use crate::errors::{PlayerError, Result};

/// Verify that an ffmpeg binary is available, downloading one when it isn't.
///
/// It returns `false` when no binary could be made available, in which case
/// opening a video will fail.
pub fn ensure_ffmpeg() -> bool {
    if ffmpeg_is_installed() {
        debug!("ffmpeg is already available");
        return true;
    }

    info!("ffmpeg not found, attempting download...");
    match ffmpeg_sidecar::download::auto_download() {
        Ok(()) => {
            info!("ffmpeg downloaded successfully");
            true
        }
        Err(e) => {
            warn!("Failed to download ffmpeg, {}", e);
            false
        }
    }
}

/// Decodes video frames through a spawned ffmpeg process.
///
/// The process writes raw RGB frames to its stdout pipe, which are consumed
/// one at a time through [MediaSource::next_frame]. The process is stopped
/// and reaped when the source is dropped.
pub struct FfmpegMediaSource {
    child: FfmpegChild,
    events: FfmpegIterator,
    pending: Option<OutputVideoFrame>,
    width: u32,
    height: u32,
    frame_rate: f32,
    position: Duration,
}

impl FfmpegMediaSource {
    /// Open the given video file for decoding.
    ///
    /// The first frame is decoded eagerly, so a file that can't be decoded
    /// fails here instead of during playback.
    pub fn open(path: &Path) -> Result<Self> {
        let mut child = FfmpegCommand::new()
            .input(path.to_string_lossy())
            .rawvideo()
            .spawn()
            .map_err(|e| PlayerError::OpenFailed(path.display().to_string(), e.to_string()))?;
        let events = child
            .iter()
            .map_err(|e| PlayerError::OpenFailed(path.display().to_string(), e.to_string()))?;

        let mut source = Self {
            child,
            events,
            pending: None,
            width: 0,
            height: 0,
            frame_rate: 0.0,
            position: Duration::default(),
        };
        let mut failure: Option<String> = None;

        while let Some(event) = source.events.next() {
            match event {
                FfmpegEvent::ParsedInputStream(stream) => {
                    if let Some(video) = stream.video_data() {
                        source.frame_rate = video.fps;
                        debug!(
                            "Video stream of {} is {}x{} at {} fps",
                            path.display(),
                            video.width,
                            video.height,
                            video.fps
                        );
                    }
                }
                FfmpegEvent::OutputFrame(frame) => {
                    source.width = frame.width;
                    source.height = frame.height;
                    source.pending = Some(frame);
                    break;
                }
                FfmpegEvent::Error(e) => {
                    failure.get_or_insert(e);
                }
                FfmpegEvent::Done => break,
                _ => {}
            }
        }

        // dropping the source on this path stops the spawned process
        if source.pending.is_none() {
            return Err(PlayerError::OpenFailed(
                path.display().to_string(),
                failure.unwrap_or_else(|| "no video frames were produced".to_string()),
            ));
        }

        Ok(source)
    }

    /// The width of the decoded video frames.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The height of the decoded video frames.
    pub fn height(&self) -> u32 {
        self.height
    }

    fn pull(&mut self) -> Option<OutputVideoFrame> {
        for event in self.events.by_ref() {
            match event {
                FfmpegEvent::OutputFrame(frame) => return Some(frame),
                FfmpegEvent::Error(e) => warn!("Decoder error, {}", e),
                FfmpegEvent::Done => return None,
                _ => {}
            }
        }

        None
    }

    /// Stop the decoder process and reap it.
    fn shutdown(&mut self) {
        if let Err(e) = self.child.kill() {
            trace!("Decoder process has already stopped, {}", e);
        }
        match self.child.wait() {
            Ok(status) => debug!("Decoder process exited with {}", status),
            Err(e) => warn!("Failed to reap the decoder process, {}", e),
        }
    }
}

impl Drop for FfmpegMediaSource {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl MediaSource for FfmpegMediaSource {
    fn next_frame(&mut self) -> Option<RgbImage> {
        let frame = match self.pending.take() {
            Some(frame) => Some(frame),
            None => self.pull(),
        }?;

        self.position = Duration::from_secs_f32(frame.timestamp.max(0.0));
        trace!("Decoded frame {} at {:.3}s", frame.frame_num, frame.timestamp);
        match RgbImage::from_raw(frame.width, frame.height, frame.data) {
            Some(image) => Some(image),
            None => {
                warn!("Dropping malformed frame {}", frame.frame_num);
                None
            }
        }
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn frame_rate(&self) -> f32 {
        self.frame_rate
    }
}

impl Debug for FfmpegMediaSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FfmpegMediaSource")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("frame_rate", &self.frame_rate)
            .field("position", &self.position)
            .finish()
    }
}
