use derive_more::Display;

/// A parsed subtitle cue from a subtitle file.
///
/// Times are in seconds. Cues are created once by the parser and never
/// mutated afterwards. `start_time <= end_time` is not validated, a reversed
/// interval simply never matches any playback time.
#[derive(Debug, Display, Clone, PartialEq)]
#[display("start_time: {}, end_time: {}, lines: {:?}", start_time, end_time, lines)]
pub struct SubtitleCue {
    start_time: f64,
    end_time: f64,
    lines: Vec<String>,
}

impl SubtitleCue {
    /// Create a new cue for the given time interval and text lines.
    pub fn new(start_time: f64, end_time: f64, lines: Vec<String>) -> Self {
        Self {
            start_time,
            end_time,
            lines,
        }
    }

    pub fn start_time(&self) -> &f64 {
        &self.start_time
    }

    pub fn end_time(&self) -> &f64 {
        &self.end_time
    }

    pub fn lines(&self) -> &Vec<String> {
        &self.lines
    }

    /// Verify if this cue is active at the given playback time in seconds.
    /// The time interval of a cue is inclusive on both ends.
    pub fn is_active(&self, time: f64) -> bool {
        self.start_time <= time && time <= self.end_time
    }
}
