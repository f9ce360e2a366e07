use std::fmt;
use std::str::FromStr;

use hardsub_rip_types::FrameIndex;

/// One boundary of the requested frame range, as supplied on the command
/// line: a literal frame number, an `MM:SS` / `HH:MM:SS` timestamp resolved
/// against the source frame rate, or the sentinel meaning "full range".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeMarker {
    Default,
    Frame(FrameIndex),
    Seconds(u64),
}

impl FromStr for RangeMarker {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("default") {
            return Ok(RangeMarker::Default);
        }
        if let Ok(frame) = value.parse::<FrameIndex>() {
            return Ok(RangeMarker::Frame(frame));
        }
        let parts: Vec<&str> = value.split(':').collect();
        if parts.len() != 2 && parts.len() != 3 {
            return Err(format!(
                "'{value}' is not a frame number, an [HH:]MM:SS timestamp, or 'default'"
            ));
        }
        let mut seconds = 0u64;
        for part in &parts {
            let field: u64 = part
                .parse()
                .map_err(|_| format!("'{value}' contains a non-numeric timestamp field"))?;
            seconds = seconds * 60 + field;
        }
        Ok(RangeMarker::Seconds(seconds))
    }
}

impl RangeMarker {
    fn resolve(&self, fps: f64, fallback: FrameIndex) -> FrameIndex {
        match self {
            RangeMarker::Default => fallback,
            RangeMarker::Frame(frame) => *frame,
            RangeMarker::Seconds(seconds) => (*seconds as f64 * fps).round() as FrameIndex,
        }
    }
}

/// Resolved `[start, end)` frame range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex,
}

impl FrameRange {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn frames(&self) -> std::ops::Range<FrameIndex> {
        self.start..self.end
    }
}

#[derive(Debug)]
pub enum RangeError {
    Empty { start: FrameIndex, end: FrameIndex },
    OutOfBounds { end: FrameIndex, frame_count: u64 },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::Empty { start, end } => {
                write!(f, "frame range [{start}, {end}) selects no frames")
            }
            RangeError::OutOfBounds { end, frame_count } => {
                write!(
                    f,
                    "frame range ends at {end} but the source only has {frame_count} frame(s)"
                )
            }
        }
    }
}

impl std::error::Error for RangeError {}

pub fn resolve_range(
    start: RangeMarker,
    end: RangeMarker,
    fps: f64,
    frame_count: u64,
) -> Result<FrameRange, RangeError> {
    let start = start.resolve(fps, 0);
    let end = end.resolve(fps, frame_count);
    if end > frame_count {
        return Err(RangeError::OutOfBounds { end, frame_count });
    }
    if start >= end {
        return Err(RangeError::Empty { start, end });
    }
    Ok(FrameRange { start, end })
}
