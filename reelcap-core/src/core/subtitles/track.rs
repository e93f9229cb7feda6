use std::path::Path;

use derive_more::Display;
use log::{debug, warn};

use crate::core::subtitles::cue::SubtitleCue;
use crate::core::subtitles::SrtParser;

/// The ordered collection of cues loaded from a subtitle file.
///
/// Cues keep the order in which they appeared in the source file. The track
/// is built once before playback starts and is only read afterwards.
#[derive(Debug, Display, Clone, Default, PartialEq)]
#[display("cues: {}", (self.cues.len()))]
pub struct SubtitleTrack {
    cues: Vec<SubtitleCue>,
}

impl SubtitleTrack {
    /// Create a new track from the given cues.
    pub fn new(cues: Vec<SubtitleCue>) -> Self {
        Self { cues }
    }

    /// Load a track from the given subtitle file.
    ///
    /// A missing or unreadable file is not an error, it results in an empty
    /// track and playback continues without subtitles.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            warn!(
                "Subtitle file {} does not exist, continuing without subtitles",
                path.display()
            );
            return Self::default();
        }

        match SrtParser::new().parse_file(path) {
            Ok(cues) => {
                debug!("Loaded {} cues from {}", cues.len(), path.display());
                Self::new(cues)
            }
            Err(e) => {
                warn!("Failed to load subtitles, {}", e);
                Self::default()
            }
        }
    }

    /// Get the active cue for the given playback time in seconds.
    ///
    /// The lookup scans the cues in file order and returns the first match,
    /// so when cues overlap, the earliest-appearing cue wins.
    pub fn active_cue(&self, time: f64) -> Option<&SubtitleCue> {
        self.cues.iter().find(|e| e.is_active(time))
    }

    /// The cues of this track in file order.
    pub fn cues(&self) -> &[SubtitleCue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

#[cfg(test)]
mod test {
    use crate::init_logger;

    use super::*;

    #[test]
    fn test_active_cue_boundaries() {
        init_logger!();
        let cue = SubtitleCue::new(1.5, 3.0, vec!["lorem".to_string()]);
        let track = SubtitleTrack::new(vec![cue.clone()]);

        assert_eq!(Some(&cue), track.active_cue(1.5));
        assert_eq!(Some(&cue), track.active_cue(3.0));
        assert_eq!(None, track.active_cue(1.25));
        assert_eq!(None, track.active_cue(3.25));
    }

    #[test]
    fn test_active_cue_overlap_first_match_wins() {
        init_logger!();
        let first = SubtitleCue::new(0.0, 5.0, vec!["first".to_string()]);
        let second = SubtitleCue::new(2.0, 8.0, vec!["second".to_string()]);
        let track = SubtitleTrack::new(vec![first.clone(), second.clone()]);

        let result = track.active_cue(3.0);

        assert_eq!(
            Some(&first),
            result,
            "expected the earliest cue in file order to win"
        );
        assert_eq!(Some(&second), track.active_cue(6.0));
    }

    #[test]
    fn test_active_cue_reversed_interval_never_matches() {
        init_logger!();
        let track = SubtitleTrack::new(vec![SubtitleCue::new(5.0, 2.0, vec!["lorem".to_string()])]);

        assert_eq!(None, track.active_cue(3.0));
    }

    #[test]
    fn test_active_cue_empty_track() {
        init_logger!();
        let track = SubtitleTrack::default();

        assert_eq!(None, track.active_cue(0.0));
    }

    #[test]
    fn test_load() {
        init_logger!();
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("movie.srt");
        std::fs::write(
            &path,
            "1\n00:00:01,500 --> 00:00:03,000\nHello\nWorld\n\n2\n00:00:04,000 --> 00:00:05,000\nBye\n",
        )
        .unwrap();

        let result = SubtitleTrack::load(&path);

        assert_eq!(2, result.len());
        assert_eq!(
            Some(&SubtitleCue::new(
                1.5,
                3.0,
                vec!["Hello".to_string(), "World".to_string()]
            )),
            result.active_cue(2.0)
        );
    }

    #[test]
    fn test_load_missing_file() {
        init_logger!();
        let temp_dir = tempfile::tempdir().unwrap();

        let result = SubtitleTrack::load(temp_dir.path().join("missing.srt"));

        assert!(
            result.is_empty(),
            "expected a missing subtitle file to result in an empty track"
        );
        assert_eq!(None, result.active_cue(0.0));
    }

    #[test]
    fn test_load_unreadable_path() {
        init_logger!();
        let temp_dir = tempfile::tempdir().unwrap();

        // the path exists but reading it fails, as it is a directory
        let result = SubtitleTrack::load(temp_dir.path());

        assert!(
            result.is_empty(),
            "expected an unreadable subtitle path to result in an empty track"
        );
    }
}
