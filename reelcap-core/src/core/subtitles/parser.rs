use std::fs;
use std::path::Path;

use log::trace;

use crate::core::subtitles::cue::SubtitleCue;
use crate::core::subtitles::{Result, SubtitleError};

const TIME_SEPARATOR: &str = "-->";
const MILLIS_PER_SECOND: f64 = 1000.0;

/// A lenient parser for SubRip-like subtitle files.
///
/// The parser makes a single forward pass over the lines of the input.
/// A cue block which doesn't follow the expected shape is dropped without
/// failing the surrounding parse, so one corrupt block never discards an
/// otherwise usable file.
#[derive(Debug, Default)]
pub struct SrtParser;

impl SrtParser {
    /// Create a new srt parser instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the given subtitle file into cues.
    /// Undecodable byte sequences within the file are replaced instead of rejected.
    ///
    /// It returns the parsed cues, or [SubtitleError::ReadFailed] when the file couldn't be read.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<SubtitleCue>> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            SubtitleError::ReadFailed(path.to_string_lossy().to_string(), e.to_string())
        })?;

        Ok(self.parse_string(String::from_utf8_lossy(&bytes).as_ref()))
    }

    /// Parse the given subtitle data into cues.
    /// Cues keep the order in which they appear in the data.
    pub fn parse_string(&self, value: &str) -> Vec<SubtitleCue> {
        let content: Vec<&str> = value.split('\n').collect();
        let mut cues: Vec<SubtitleCue> = vec![];
        let mut idx = 0;

        while idx < content.len() {
            // skip blank lines between cue blocks
            if content[idx].trim().is_empty() {
                idx += 1;
                continue;
            }
            // skip the optional cue index line, its value is discarded and cues
            // are renumbered implicitly by their position in the collection
            if Self::is_index_line(content[idx]) {
                idx += 1;
            }
            if idx >= content.len() {
                break;
            }

            let timing = content[idx].trim();
            idx += 1;
            if !timing.contains(TIME_SEPARATOR) {
                trace!("Skipping noise line {}, missing time separator", idx);
                continue;
            }
            let (start_time, end_time) = match Self::parse_timing(timing) {
                Ok(e) => e,
                Err(e) => {
                    trace!("Dropping cue block, {}", e);
                    continue;
                }
            };

            // collect the text lines of the cue until the next blank line
            let mut lines: Vec<String> = vec![];
            while idx < content.len() && !content[idx].trim().is_empty() {
                lines.push(content[idx].trim_end_matches('\r').to_string());
                idx += 1;
            }

            cues.push(SubtitleCue::new(start_time, end_time, lines));

            // consume the blank run separating this cue from the next block
            while idx < content.len() && content[idx].trim().is_empty() {
                idx += 1;
            }
        }

        trace!("Parsed a total of {} cues", cues.len());
        cues
    }

    /// Convert an `HH:MM:SS,mmm` timecode into seconds.
    ///
    /// Component widths are not enforced, which matches the leniency of the
    /// rest of the parser. It returns [SubtitleError::InvalidTimecode] when
    /// the value doesn't follow the expected shape.
    pub fn parse_timecode(value: &str) -> Result<f64> {
        let (hms, millis) = value
            .split_once(',')
            .ok_or_else(|| SubtitleError::InvalidTimecode(value.to_string()))?;
        let mut components = hms.split(':');

        match (
            components.next(),
            components.next(),
            components.next(),
            components.next(),
        ) {
            (Some(hours), Some(minutes), Some(seconds), None) => {
                let hours = Self::parse_component(hours, value)?;
                let minutes = Self::parse_component(minutes, value)?;
                let seconds = Self::parse_component(seconds, value)?;
                let millis = Self::parse_component(millis, value)?;

                Ok(hours * 3600.0 + minutes * 60.0 + seconds + millis / MILLIS_PER_SECOND)
            }
            _ => Err(SubtitleError::InvalidTimecode(value.to_string())),
        }
    }

    fn parse_timing(timing: &str) -> Result<(f64, f64)> {
        let (start, end) = timing
            .split_once(TIME_SEPARATOR)
            .ok_or_else(|| SubtitleError::InvalidTimecode(timing.to_string()))?;

        Ok((
            Self::parse_timecode(start.trim())?,
            Self::parse_timecode(end.trim())?,
        ))
    }

    fn parse_component(component: &str, timecode: &str) -> Result<f64> {
        component
            .trim()
            .parse::<u32>()
            .map(f64::from)
            .map_err(|_| SubtitleError::InvalidTimecode(timecode.to_string()))
    }

    fn is_index_line(line: &str) -> bool {
        let line = line.trim();
        !line.is_empty() && line.chars().all(|e| e.is_ascii_digit())
    }
}

#[cfg(test)]
mod test {
    use crate::init_logger;

    use super::*;

    #[test]
    fn test_parse_string_single_cue() {
        init_logger!();
        let parser = SrtParser::new();
        let expected_result = vec![SubtitleCue::new(
            1.5,
            3.0,
            vec!["Hello".to_string(), "World".to_string()],
        )];

        let result = parser.parse_string("1\n00:00:01,500 --> 00:00:03,000\nHello\nWorld\n\n");

        assert_eq!(expected_result, result);
    }

    #[test]
    fn test_parse_string_multiple_cues() {
        init_logger!();
        let parser = SrtParser::new();
        let expected_result = vec![
            SubtitleCue::new(
                1.25,
                2.75,
                vec!["This is the path".to_string(), "you've chosen, is it?".to_string()],
            ),
            SubtitleCue::new(4.0, 6.5, vec!["It is.".to_string()]),
        ];

        let result = parser.parse_string(
            "1\n00:00:01,250 --> 00:00:02,750\nThis is the path\nyou've chosen, is it?\n\n2\n00:00:04,000 --> 00:00:06,500\nIt is.\n",
        );

        assert_eq!(expected_result, result);
    }

    #[test]
    fn test_parse_string_carriage_returns() {
        init_logger!();
        let parser = SrtParser::new();
        let expected_result = vec![SubtitleCue::new(
            1.0,
            2.0,
            vec!["  Drink up, me hearties".to_string()],
        )];

        let result =
            parser.parse_string("1\r\n00:00:01,000 --> 00:00:02,000\r\n  Drink up, me hearties\r\n\r\n");

        assert_eq!(
            expected_result, result,
            "expected only trailing carriage returns to be stripped"
        );
    }

    #[test]
    fn test_parse_string_invalid_millis_drops_block() {
        init_logger!();
        let parser = SrtParser::new();
        let expected_result = vec![SubtitleCue::new(4.0, 5.0, vec!["valid".to_string()])];

        let result = parser.parse_string(
            "1\n00:00:01,5x0 --> 00:00:03,000\nbroken\n\n2\n00:00:04,000 --> 00:00:05,000\nvalid\n\n",
        );

        assert_eq!(
            expected_result, result,
            "expected the malformed block to be dropped and parsing to resume"
        );
    }

    #[test]
    fn test_parse_string_missing_separator_is_noise() {
        init_logger!();
        let parser = SrtParser::new();
        let expected_result = vec![SubtitleCue::new(2.0, 3.0, vec!["lorem".to_string()])];

        let result =
            parser.parse_string("not a timing line\n2\n00:00:02,000 --> 00:00:03,000\nlorem\n");

        assert_eq!(expected_result, result);
    }

    #[test]
    fn test_parse_string_cue_without_text() {
        init_logger!();
        let parser = SrtParser::new();
        let expected_result = vec![SubtitleCue::new(1.0, 2.0, vec![])];

        let result = parser.parse_string("1\n00:00:01,000 --> 00:00:02,000\n\n");

        assert_eq!(
            expected_result, result,
            "expected a cue without text lines to be emitted"
        );
    }

    #[test]
    fn test_parse_string_trailing_cue_without_separator() {
        init_logger!();
        let parser = SrtParser::new();
        let expected_result = vec![
            SubtitleCue::new(1.0, 2.0, vec!["first".to_string()]),
            SubtitleCue::new(3.0, 4.0, vec!["last".to_string()]),
        ];

        let result = parser.parse_string(
            "1\n00:00:01,000 --> 00:00:02,000\nfirst\n\n2\n00:00:03,000 --> 00:00:04,000\nlast",
        );

        assert_eq!(expected_result, result);
    }

    #[test]
    fn test_parse_string_index_at_end_of_input() {
        init_logger!();
        let parser = SrtParser::new();

        let result = parser.parse_string("1\n00:00:01,000 --> 00:00:02,000\nlorem\n\n2");

        assert_eq!(
            vec![SubtitleCue::new(1.0, 2.0, vec!["lorem".to_string()])],
            result
        );
    }

    #[test]
    fn test_parse_string_digit_only_text_line() {
        init_logger!();
        let parser = SrtParser::new();
        let expected_result = vec![SubtitleCue::new(
            1.0,
            2.0,
            vec!["42".to_string(), "1984".to_string()],
        )];

        let result = parser.parse_string("1\n00:00:01,000 --> 00:00:02,000\n42\n1984\n\n");

        assert_eq!(
            expected_result, result,
            "expected digit-only lines after the timing line to be cue text"
        );
    }

    #[test]
    fn test_parse_string_consumes_blank_runs() {
        init_logger!();
        let parser = SrtParser::new();

        let result = parser.parse_string(
            "1\n00:00:01,000 --> 00:00:02,000\nfirst\n\n\n\n2\n00:00:03,000 --> 00:00:04,000\nsecond\n",
        );

        assert_eq!(2, result.len());
    }

    #[test]
    fn test_parse_string_timing_without_index() {
        init_logger!();
        let parser = SrtParser::new();
        let expected_result = vec![SubtitleCue::new(1.0, 2.0, vec!["no index".to_string()])];

        let result = parser.parse_string("00:00:01,000 --> 00:00:02,000\nno index\n\n");

        assert_eq!(expected_result, result);
    }

    #[test]
    fn test_parse_string_empty_input() {
        init_logger!();
        let parser = SrtParser::new();

        let result = parser.parse_string("");

        assert_eq!(Vec::<SubtitleCue>::new(), result);
    }

    #[test]
    fn test_parse_timecode() {
        init_logger!();
        assert_eq!(Ok(1.5), SrtParser::parse_timecode("00:00:01,500"));
        assert_eq!(Ok(3600.0 + 120.0 + 3.25), SrtParser::parse_timecode("01:02:03,250"));
        assert_eq!(Ok(0.0), SrtParser::parse_timecode("00:00:00,000"));
    }

    #[test]
    fn test_parse_timecode_unpadded_components() {
        init_logger!();
        let result = SrtParser::parse_timecode("0:0:1,5").expect("expected a valid timecode");

        assert!(
            (result - 1.005).abs() < 1e-9,
            "expected an unpadded millis component to keep its integer value, got {}",
            result
        );
    }

    #[test]
    fn test_parse_timecode_invalid() {
        init_logger!();
        assert_eq!(
            Err(SubtitleError::InvalidTimecode("00:00:01".to_string())),
            SrtParser::parse_timecode("00:00:01"),
            "expected a missing millis separator to be invalid"
        );
        assert_eq!(
            Err(SubtitleError::InvalidTimecode("00:01,500".to_string())),
            SrtParser::parse_timecode("00:01,500"),
            "expected a missing component to be invalid"
        );
        assert_eq!(
            Err(SubtitleError::InvalidTimecode("00:00:00:01,500".to_string())),
            SrtParser::parse_timecode("00:00:00:01,500"),
            "expected an additional component to be invalid"
        );
        assert_eq!(
            Err(SubtitleError::InvalidTimecode("00:00:0a,500".to_string())),
            SrtParser::parse_timecode("00:00:0a,500"),
            "expected a non-numeric component to be invalid"
        );
    }

    #[test]
    fn test_parse_file() {
        init_logger!();
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("example.srt");
        std::fs::write(
            &path,
            "1\n00:00:01,500 --> 00:00:03,000\nHello\nWorld\n\n",
        )
        .unwrap();
        let parser = SrtParser::new();

        let result = parser.parse_file(&path).expect("expected the file to be parsed");

        assert_eq!(
            vec![SubtitleCue::new(
                1.5,
                3.0,
                vec!["Hello".to_string(), "World".to_string()]
            )],
            result
        );
    }

    #[test]
    fn test_parse_file_missing() {
        init_logger!();
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.srt");
        let parser = SrtParser::new();

        let result = parser.parse_file(&path);

        if let Err(SubtitleError::ReadFailed(filename, _)) = result {
            assert_eq!(path.to_string_lossy().to_string(), filename);
        } else {
            panic!("expected SubtitleError::ReadFailed, got {:?} instead", result);
        }
    }

    #[test]
    fn test_parse_file_undecodable_bytes() {
        init_logger!();
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("latin1.srt");
        std::fs::write(&path, b"1\n00:00:01,000 --> 00:00:02,000\ncaf\xE9\n\n").unwrap();
        let parser = SrtParser::new();

        let result = parser.parse_file(&path).expect("expected the file to be parsed");

        assert_eq!(
            vec![SubtitleCue::new(1.0, 2.0, vec!["caf\u{FFFD}".to_string()])],
            result,
            "expected undecodable bytes to be replaced instead of failing the parse"
        );
    }

    #[test]
    fn test_parse_file_undecodable_bytes_in_timing_line() {
        init_logger!();
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("mangled.srt");
        std::fs::write(
            &path,
            b"1\n00:00:01,000 --> 00:00:02,0\xFF0\nbroken\n\n2\n00:00:03,000 --> 00:00:04,000\nStill here\n\n",
        )
        .unwrap();
        let parser = SrtParser::new();

        let result = parser.parse_file(&path).expect("expected the file to be parsed");

        assert_eq!(
            vec![SubtitleCue::new(3.0, 4.0, vec!["Still here".to_string()])],
            result,
            "expected the mangled block to be dropped and parsing to resume"
        );
    }
}
