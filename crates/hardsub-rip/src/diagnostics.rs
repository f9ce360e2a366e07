use hardsub_rip_types::{FrameIndex, Interval};
use serde::Serialize;

/// Frame-level problems aggregated across the run. None of these abort the
/// pipeline; they degrade the affected frame or interval and are reported in
/// one end-of-run summary.
#[derive(Debug, Default, Serialize)]
pub struct RunDiagnostics {
    /// Frames whose presence detection failed (treated as absent).
    pub detection_failures: Vec<FrameIndex>,
    /// Frames whose recognition chain was exhausted (treated as empty text).
    pub recognition_failures: Vec<FrameIndex>,
    /// Degenerate intervals dropped by the subdivision engine.
    pub dropped_intervals: Vec<Interval>,
}

impl RunDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.detection_failures.is_empty()
            && self.recognition_failures.is_empty()
            && self.dropped_intervals.is_empty()
    }

    pub fn record_recognition_failure(&mut self, frame: FrameIndex) {
        self.recognition_failures.push(frame);
    }

    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.detection_failures.is_empty() {
            parts.push(format!(
                "{} frame(s) failed detection: {}",
                self.detection_failures.len(),
                list_frames(&self.detection_failures)
            ));
        }
        if !self.recognition_failures.is_empty() {
            parts.push(format!(
                "{} frame(s) failed recognition: {}",
                self.recognition_failures.len(),
                list_frames(&self.recognition_failures)
            ));
        }
        if !self.dropped_intervals.is_empty() {
            let intervals: Vec<String> = self
                .dropped_intervals
                .iter()
                .map(|interval| interval.to_string())
                .collect();
            parts.push(format!(
                "{} degenerate interval(s) dropped: {}",
                self.dropped_intervals.len(),
                intervals.join(", ")
            ));
        }
        parts.join("\n")
    }
}

const LISTED_FRAMES_LIMIT: usize = 8;

fn list_frames(frames: &[FrameIndex]) -> String {
    let mut listed: Vec<String> = frames
        .iter()
        .take(LISTED_FRAMES_LIMIT)
        .map(|frame| frame.to_string())
        .collect();
    if frames.len() > LISTED_FRAMES_LIMIT {
        listed.push(format!("... ({} more)", frames.len() - LISTED_FRAMES_LIMIT));
    }
    listed.join(", ")
}
