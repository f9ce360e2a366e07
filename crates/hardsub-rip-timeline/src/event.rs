use hardsub_rip_types::{FrameIndex, Interval, SubtitleEvent, TextSample};

/// Converts finalized intervals into numbered, timestamped events.
///
/// Intervals are sorted by start frame before sequence numbers are assigned:
/// subdivision may hand them over out of chronological order, and numbering
/// must never depend on production order. Representative text is sampled at
/// the temporal midpoint, away from the transitioning boundary frames.
pub fn materialize<F>(intervals: &[Interval], fps: f64, mut sample: F) -> Vec<SubtitleEvent>
where
    F: FnMut(FrameIndex) -> TextSample,
{
    debug_assert!(fps > 0.0);
    let mut ordered = intervals.to_vec();
    ordered.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));

    ordered
        .iter()
        .enumerate()
        .map(|(idx, interval)| SubtitleEvent {
            sequence: idx as u32 + 1,
            start: interval.start,
            end: interval.end,
            start_ms: frames_to_ms(interval.start, fps),
            // The +1 keeps the closing boundary inclusive of the last present
            // frame's display duration.
            end_ms: frames_to_ms(interval.end + 1, fps),
            text: sample(interval.midpoint()),
        })
        .collect()
}

pub fn frames_to_ms(frame: FrameIndex, fps: f64) -> u64 {
    (frame as f64 / fps * 1000.0).floor() as u64
}
