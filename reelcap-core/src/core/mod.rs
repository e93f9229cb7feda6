pub mod config;
pub mod overlay;
pub mod playback;
pub mod screenshots;
pub mod subtitles;
