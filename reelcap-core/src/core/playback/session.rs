use std::path::PathBuf;
use std::time::Duration;

use image::RgbImage;
use log::{debug, info};

use crate::core::config::PlaybackSettings;
use crate::core::overlay::OverlayRenderer;
use crate::core::playback::MediaSource;
use crate::core::screenshots::{Result, ScreenshotError, ScreenshotService};
use crate::core::subtitles::SubtitleTrack;

const MILLIS_PER_SECOND: f32 = 1000.0;

/// Drives a single video playback session.
///
/// The session pulls decoded frames from its [MediaSource], applies the
/// active subtitle cue through the overlay renderer, and captures raw frames
/// as screenshots on demand. It is driven by the display loop, one frame at
/// a time.
#[derive(Debug)]
pub struct PlaybackSession {
    source: Box<dyn MediaSource>,
    track: SubtitleTrack,
    renderer: Option<OverlayRenderer>,
    screenshots: ScreenshotService,
    settings: PlaybackSettings,
    paused: bool,
    ended: bool,
    frame: Option<RgbImage>,
}

impl PlaybackSession {
    /// Create a new builder for a playback session.
    pub fn builder() -> PlaybackSessionBuilder {
        PlaybackSessionBuilder::default()
    }

    /// Advance playback by one frame.
    ///
    /// While paused, the current frame is kept and the source isn't read.
    /// It returns `true` as long as there is a frame to display.
    pub fn advance(&mut self) -> bool {
        if self.paused {
            return self.frame.is_some();
        }
        if self.ended {
            return false;
        }

        match self.source.next_frame() {
            Some(frame) => {
                self.frame = Some(frame);
                true
            }
            None => {
                info!("End of video");
                self.ended = true;
                self.frame = None;
                false
            }
        }
    }

    /// Whether playback is currently paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Toggle between playing and paused.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        debug!(
            "Playback has been {}",
            if self.paused { "paused" } else { "resumed" }
        );
    }

    /// The frame to display for the current playback position.
    ///
    /// When a subtitle cue is active, it is rendered onto a copy of the
    /// frame. The raw frame held by the session is never modified.
    pub fn display_frame(&self) -> Option<RgbImage> {
        let frame = self.frame.as_ref()?;
        let time = self.source.position().as_secs_f64();

        if let Some(renderer) = &self.renderer {
            if let Some(cue) = self.track.active_cue(time) {
                return Some(renderer.render(frame, cue.lines()));
            }
        }

        Some(frame.clone())
    }

    /// Capture the current frame as a screenshot.
    ///
    /// The raw frame is saved, without any subtitle overlay, even when a cue
    /// is active at the time of capture.
    pub fn take_screenshot(&self) -> Result<PathBuf> {
        let frame = self
            .frame
            .as_ref()
            .ok_or(ScreenshotError::NoFrameAvailable)?;
        self.screenshots.capture(frame)
    }

    /// The delay between displayed frames, derived from the source frame rate.
    pub fn frame_interval(&self) -> Duration {
        let rate = self.source.frame_rate();
        let rate = if rate.is_finite() && rate > 0.0 {
            rate
        } else {
            debug!(
                "Source frame rate is unknown, using {} fps instead",
                self.settings.fallback_frame_rate
            );
            self.settings.fallback_frame_rate
        };

        Duration::from_millis((MILLIS_PER_SECOND / rate) as u64)
    }
}

/// The builder of a [PlaybackSession].
#[derive(Debug, Default)]
pub struct PlaybackSessionBuilder {
    source: Option<Box<dyn MediaSource>>,
    track: Option<SubtitleTrack>,
    renderer: Option<OverlayRenderer>,
    screenshots: Option<ScreenshotService>,
    settings: Option<PlaybackSettings>,
}

impl PlaybackSessionBuilder {
    /// Set the media source frames are pulled from.
    pub fn source(mut self, source: Box<dyn MediaSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the subtitle track of the session.
    pub fn track(mut self, track: SubtitleTrack) -> Self {
        self.track = Some(track);
        self
    }

    /// Set the renderer used to draw active cues onto frames.
    pub fn renderer(mut self, renderer: OverlayRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Set the screenshot service of the session.
    pub fn screenshots(mut self, screenshots: ScreenshotService) -> Self {
        self.screenshots = Some(screenshots);
        self
    }

    /// Set the playback settings of the session.
    pub fn settings(mut self, settings: PlaybackSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the playback session.
    ///
    /// # Panics
    ///
    /// It panics when the source or screenshots haven't been set.
    pub fn build(self) -> PlaybackSession {
        PlaybackSession {
            source: self.source.expect("source has not been set"),
            track: self.track.unwrap_or_default(),
            renderer: self.renderer,
            screenshots: self.screenshots.expect("screenshots has not been set"),
            settings: self.settings.unwrap_or_default(),
            paused: false,
            ended: false,
            frame: None,
        }
    }
}
