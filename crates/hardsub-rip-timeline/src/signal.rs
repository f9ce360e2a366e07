use hardsub_rip_types::{FrameIndex, Interval};
use thiserror::Error;

/// Materialized per-frame presence values over `[offset, offset + len)`.
#[derive(Debug, Clone)]
pub struct PresenceSignal {
    offset: FrameIndex,
    values: Vec<bool>,
}

impl PresenceSignal {
    pub fn new(offset: FrameIndex, values: Vec<bool>) -> Self {
        Self { offset, values }
    }

    pub fn offset(&self) -> FrameIndex {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn present_frames(&self) -> usize {
        self.values.iter().filter(|present| **present).count()
    }
}

#[derive(Debug, Error)]
pub enum SignalError {
    #[error(
        "presence signal has {starts} opening edge(s) but {ends} closing edge(s) \
         (first unmatched near frame {near})"
    )]
    MalformedSignal {
        starts: usize,
        ends: usize,
        near: FrameIndex,
    },
}

/// Single-pass edge detection over a presence signal.
///
/// A present frame opens an interval when it is the first frame of the signal
/// or its predecessor is absent; it closes one when it is the last frame of
/// the signal or its successor is absent. A width-one run therefore opens and
/// closes at the same index, including at either edge of the signal, so every
/// opening edge has a matching closing edge by construction. The matched-pair
/// bookkeeping is still verified before returning.
pub fn extract_intervals(signal: &PresenceSignal) -> Result<Vec<Interval>, SignalError> {
    let mut starts: Vec<FrameIndex> = Vec::new();
    let mut ends: Vec<FrameIndex> = Vec::new();
    let values = &signal.values;
    let len = values.len();

    for (i, &present) in values.iter().enumerate() {
        if !present {
            continue;
        }
        let frame = signal.offset + i as FrameIndex;
        let prev_present = i > 0 && values[i - 1];
        let next_present = i + 1 < len && values[i + 1];
        if !prev_present {
            starts.push(frame);
        }
        if !next_present {
            ends.push(frame);
        }
    }

    if starts.len() != ends.len() {
        let near = starts
            .iter()
            .chain(ends.iter())
            .copied()
            .last()
            .unwrap_or(signal.offset);
        return Err(SignalError::MalformedSignal {
            starts: starts.len(),
            ends: ends.len(),
            near,
        });
    }

    let mut intervals = Vec::with_capacity(starts.len());
    for (start, end) in starts.into_iter().zip(ends) {
        if end < start {
            return Err(SignalError::MalformedSignal {
                starts: intervals.len() + 1,
                ends: intervals.len() + 1,
                near: start,
            });
        }
        intervals.push(Interval::new(start, end));
    }
    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::{PresenceSignal, extract_intervals};
    use hardsub_rip_types::Interval;

    fn signal(offset: u64, pattern: &[bool]) -> PresenceSignal {
        PresenceSignal::new(offset, pattern.to_vec())
    }

    #[test]
    fn single_run_in_the_middle() {
        let intervals =
            extract_intervals(&signal(0, &[false, false, true, true, true, false, false]))
                .unwrap();
        assert_eq!(intervals, vec![Interval::new(2, 4)]);
    }

    #[test]
    fn runs_touching_both_signal_edges() {
        let intervals = extract_intervals(&signal(0, &[true, true, false, true, true])).unwrap();
        assert_eq!(intervals, vec![Interval::new(0, 1), Interval::new(3, 4)]);
    }

    #[test]
    fn isolated_frames_open_and_close_in_place() {
        let intervals =
            extract_intervals(&signal(0, &[true, false, true, false, true])).unwrap();
        assert_eq!(
            intervals,
            vec![
                Interval::new(0, 0),
                Interval::new(2, 2),
                Interval::new(4, 4)
            ]
        );
    }

    #[test]
    fn offset_shifts_frame_indices() {
        let intervals = extract_intervals(&signal(100, &[false, true, true, false])).unwrap();
        assert_eq!(intervals, vec![Interval::new(101, 102)]);
    }

    #[test]
    fn blank_signal_yields_no_intervals() {
        assert!(extract_intervals(&signal(0, &[false; 6])).unwrap().is_empty());
        assert!(extract_intervals(&signal(0, &[])).unwrap().is_empty());
    }

    #[test]
    fn fully_present_signal_is_one_interval() {
        let intervals = extract_intervals(&signal(0, &[true; 5])).unwrap();
        assert_eq!(intervals, vec![Interval::new(0, 4)]);
    }

    #[test]
    fn edge_counts_always_match_for_well_formed_signals() {
        // Exhaustive over every 10-frame pattern.
        for bits in 0u16..1024 {
            let pattern: Vec<bool> = (0..10).map(|i| bits & (1 << i) != 0).collect();
            let intervals = extract_intervals(&signal(0, &pattern)).unwrap();
            let present = pattern.iter().filter(|p| **p).count() as u64;
            let covered: u64 = intervals.iter().map(|iv| iv.frames()).sum();
            assert_eq!(covered, present, "pattern {bits:#012b}");
        }
    }
}
