//! Shared domain models for the hardsub-rip workspace.
//!
//! This crate centralizes the lightweight data structures passed between the
//! recognition provider, the timeline core, and the CLI. Keep it free of
//! platform-specific dependencies so every crate can depend on it.

use std::fmt;

use serde::Serialize;

/// 0-based frame ordinal within the caller-supplied `[start, end)` range.
pub type FrameIndex = u64;

/// Recognized text lines associated with a single frame.
///
/// A sample is computed on demand through the recognition provider; an empty
/// sample stands in for a frame whose recognition failed entirely.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TextSample {
    lines: Vec<String>,
}

impl TextSample {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn empty() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }

    /// All lines joined into one comparison string, without separators.
    pub fn joined(&self) -> String {
        self.lines.concat()
    }
}

impl From<Vec<String>> for TextSample {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines)
    }
}

impl From<&str> for TextSample {
    fn from(line: &str) -> Self {
        Self::new(vec![line.to_string()])
    }
}

/// Candidate contiguous presence run, inclusive on both ends.
///
/// Intervals are never mutated in place; subdivision replaces them with new
/// values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub start: FrameIndex,
    pub end: FrameIndex,
}

impl Interval {
    pub fn new(start: FrameIndex, end: FrameIndex) -> Self {
        Self { start, end }
    }

    /// Number of frames covered. Zero for an inverted candidate.
    pub fn frames(&self) -> u64 {
        if self.end < self.start {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }

    /// Temporal midpoint frame, used to pick the representative text.
    pub fn midpoint(&self) -> FrameIndex {
        (self.start + self.end + 1) / 2
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

/// Finalized, numbered subtitle event.
///
/// Created only by the event materializer, strictly ordered by `start` with
/// strictly increasing `sequence` numbers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubtitleEvent {
    pub sequence: u32,
    pub start: FrameIndex,
    pub end: FrameIndex,
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: TextSample,
}
