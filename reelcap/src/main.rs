use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{debug, error, info, warn, LevelFilter};

use reelcap_core::core::config::{CaptureSettings, PlaybackSettings};
use reelcap_core::core::overlay::{OverlayRenderer, SystemTextRasterizer};
use reelcap_core::core::playback::PlaybackSession;
use reelcap_core::core::screenshots::{ImageFileSink, ScreenshotService};
use reelcap_core::core::subtitles::SubtitleTrack;
use reelcap_logging::ReelLogger;

use crate::decoder::{ensure_ffmpeg, FfmpegMediaSource};
use crate::errors::{PlayerError, Result};

mod app;
mod decoder;
mod errors;

const SUBTITLE_EXTENSION: &str = "srt";

/// Play a video file with subtitle captions and capture raw frames as screenshots.
#[derive(Debug, Clone, Parser)]
#[command(name = "reelcap", version = reelcap_core::VERSION)]
pub struct Args {
    /// The path of the video file to play.
    #[arg(long)]
    pub video: PathBuf,
    /// The path of the subtitle file to load.
    /// Defaults to the video path with an srt extension when not given.
    #[arg(long)]
    pub subtitle: Option<PathBuf>,
    /// The directory screenshots are saved into.
    #[arg(long, default_value = "screenshots")]
    pub output_dir: PathBuf,
    /// The file the application logs are written to, next to the console output.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    init_logger(&args);

    if let Err(e) = run(args) {
        error!("Reelcap exited with an error, {}", e);
        process::exit(1);
    }
}

/// Run the player with the given arguments.
///
/// This function returns once the video has ended or the user has quit.
fn run(args: Args) -> Result<()> {
    if !args.video.exists() {
        return Err(PlayerError::VideoNotFound(args.video.display().to_string()));
    }

    let track = load_subtitles(&args);
    let renderer = create_renderer();
    let capture = CaptureSettings {
        output_directory: args.output_dir.clone(),
    };
    let screenshots = ScreenshotService::new(capture.output_directory, Box::new(ImageFileSink))
        .map_err(|e| PlayerError::StorageFailed(e.to_string()))?;

    ensure_ffmpeg();
    let source = FfmpegMediaSource::open(&args.video)?;
    let width = source.width();
    let height = source.height();

    let mut builder = PlaybackSession::builder()
        .source(Box::new(source))
        .track(track)
        .screenshots(screenshots)
        .settings(PlaybackSettings::default());
    if let Some(renderer) = renderer {
        builder = builder.renderer(renderer);
    }

    info!("Controls: space = pause/resume, s = screenshot, q = quit");
    app::run(builder.build(), width, height)
}

/// Initialize the application logger.
///
/// A failed initialization isn't fatal, the application continues without
/// log output.
fn init_logger(args: &Args) {
    let mut builder = ReelLogger::builder();
    builder
        .root_level(LevelFilter::Info)
        .logger("eframe", LevelFilter::Warn)
        .logger("egui_glow", LevelFilter::Warn)
        .logger("winit", LevelFilter::Warn)
        .logger("fontdb", LevelFilter::Info);
    if let Some(path) = &args.log_file {
        builder.log_path(path);
    }

    if let Err(e) = builder.build() {
        eprintln!("Failed to initialize the logger, {}", e);
    }
}

/// Load the subtitle track for the given arguments.
///
/// When no subtitle path is given, a file with the video's basename and the
/// srt extension is used when it exists next to the video.
fn load_subtitles(args: &Args) -> SubtitleTrack {
    let path = match &args.subtitle {
        Some(path) => path.clone(),
        None => {
            let path = args.video.with_extension(SUBTITLE_EXTENSION);
            if !path.exists() {
                debug!("No subtitle file found next to {}", args.video.display());
                return SubtitleTrack::default();
            }
            path
        }
    };

    let track = SubtitleTrack::load(&path);
    if !track.is_empty() {
        info!("Loaded {} subtitles from {}", track.len(), path.display());
    }
    track
}

/// Create the renderer used to draw subtitle cues onto frames.
///
/// A missing system font disables the captions, playback and screenshots
/// continue to work without them.
fn create_renderer() -> Option<OverlayRenderer> {
    match SystemTextRasterizer::new() {
        Ok(rasterizer) => Some(OverlayRenderer::new(Box::new(rasterizer))),
        Err(e) => {
            warn!("Subtitle captions are disabled, {}", e);
            None
        }
    }
}
