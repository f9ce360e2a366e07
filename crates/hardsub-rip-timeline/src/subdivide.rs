use hardsub_rip_types::{FrameIndex, Interval, TextSample};

use crate::similarity::Similarity;

/// Outcome of subdividing a batch of candidate intervals.
#[derive(Debug, Default)]
pub struct Subdivision {
    /// Finalized intervals, in frame order.
    pub intervals: Vec<Interval>,
    /// Degenerate candidates that were dropped instead of emitted.
    pub dropped: Vec<Interval>,
}

/// Splits merged intervals into per-line intervals via backward text-boundary
/// scanning.
///
/// Candidates are processed through an explicit pending-work stack: pop an
/// interval, validate it, and push zero or more strictly smaller replacement
/// intervals. Pieces produced by a scan go back on the stack so their own
/// boundary frames get checked too; since every piece shrinks the range, the
/// stack always drains.
#[derive(Debug, Clone, Copy)]
pub struct Subdivider {
    similarity: Similarity,
}

impl Subdivider {
    pub fn new(similarity: Similarity) -> Self {
        Self { similarity }
    }

    pub fn subdivide_all<F>(&self, candidates: Vec<Interval>, mut sample: F) -> Subdivision
    where
        F: FnMut(FrameIndex) -> TextSample,
    {
        let mut pending = candidates;
        pending.reverse();

        let mut finished = Vec::new();
        let mut dropped = Vec::new();

        while let Some(interval) = pending.pop() {
            if interval.is_inverted() {
                dropped.push(interval);
                continue;
            }
            if interval.frames() <= 1 {
                finished.push(interval);
                continue;
            }

            let start_text = sample(interval.start);
            let end_text = sample(interval.end);
            if self.similarity.same_line(&start_text, &end_text) {
                finished.push(interval);
                continue;
            }

            let pieces = self.scan(interval, &start_text, end_text, &mut sample);
            debug_assert!(covers_exactly(interval, &pieces));
            if pieces.len() <= 1 {
                // Dissimilar endpoints but no interior boundary: unsplittable.
                finished.push(interval);
                continue;
            }
            for piece in pieces.into_iter().rev() {
                pending.push(piece);
            }
        }

        Subdivision {
            intervals: finished,
            dropped,
        }
    }

    /// Backward scan from `end - 1` down to `start + 1`.
    ///
    /// A visited frame whose text no longer matches the rolling end reference
    /// closes one piece at that frame and opens the next at the frame after
    /// it; a visited frame matching the original start text stops the scan,
    /// since the remaining prefix belongs to the first line.
    fn scan<F>(
        &self,
        interval: Interval,
        start_text: &TextSample,
        mut end_text: TextSample,
        sample: &mut F,
    ) -> Vec<Interval>
    where
        F: FnMut(FrameIndex) -> TextSample,
    {
        let mut pieces = Vec::new();
        let mut piece_end = interval.end;

        let mut frame = interval.end - 1;
        while frame > interval.start {
            let boundary = sample(frame);
            if !self.similarity.same_line(&boundary, &end_text) {
                pieces.push(Interval::new(frame + 1, piece_end));
                piece_end = frame;
                if self.similarity.same_line(&boundary, start_text) {
                    break;
                }
                end_text = boundary;
            }
            frame -= 1;
        }

        pieces.push(Interval::new(interval.start, piece_end));
        pieces.reverse();
        pieces
    }
}

/// Pieces must be contiguous, mutually exclusive, and jointly cover the
/// original frame range.
fn covers_exactly(original: Interval, pieces: &[Interval]) -> bool {
    let Some(first) = pieces.first() else {
        return false;
    };
    if first.start != original.start {
        return false;
    }
    let mut expected = original.start;
    for piece in pieces {
        if piece.start != expected || piece.is_inverted() {
            return false;
        }
        expected = piece.end + 1;
    }
    expected == original.end + 1
}

#[cfg(test)]
mod tests {
    use super::{Subdivider, covers_exactly};
    use crate::similarity::Similarity;
    use hardsub_rip_types::{FrameIndex, Interval, TextSample};
    use std::cell::RefCell;
    use std::collections::HashSet;

    fn subdivider() -> Subdivider {
        Subdivider::new(Similarity::default())
    }

    fn two_speakers(frame: FrameIndex) -> TextSample {
        if frame <= 14 {
            TextSample::from("Hello")
        } else {
            TextSample::from("Goodbye")
        }
    }

    #[test]
    fn splits_at_a_speaker_change() {
        let result = subdivider().subdivide_all(vec![Interval::new(10, 20)], two_speakers);
        assert_eq!(
            result.intervals,
            vec![Interval::new(10, 14), Interval::new(15, 20)]
        );
        assert!(result.dropped.is_empty());
    }

    #[test]
    fn similar_endpoints_are_a_fixed_point() {
        let result = subdivider()
            .subdivide_all(vec![Interval::new(3, 9)], |_| TextSample::from("Same line"));
        assert_eq!(result.intervals, vec![Interval::new(3, 9)]);
    }

    #[test]
    fn three_speakers_become_three_intervals() {
        let sample = |frame: FrameIndex| {
            if frame <= 4 {
                TextSample::from("First speaker talking")
            } else if frame <= 8 {
                TextSample::from("An interruption happens")
            } else {
                TextSample::from("Somebody else entirely")
            }
        };
        let result = subdivider().subdivide_all(vec![Interval::new(0, 12)], sample);
        assert_eq!(
            result.intervals,
            vec![
                Interval::new(0, 4),
                Interval::new(5, 8),
                Interval::new(9, 12)
            ]
        );
    }

    #[test]
    fn pieces_partition_the_original_range() {
        let sample = |frame: FrameIndex| {
            if frame < 25 {
                TextSample::from("Alpha line")
            } else if frame < 40 {
                TextSample::from("Beta reply")
            } else {
                TextSample::from("Gamma closing")
            }
        };
        let original = Interval::new(10, 55);
        let result = subdivider().subdivide_all(vec![original], sample);
        assert!(covers_exactly(original, &result.intervals));
    }

    #[test]
    fn width_one_intervals_pass_through_untouched() {
        let calls = RefCell::new(0usize);
        let result = subdivider().subdivide_all(vec![Interval::new(7, 7)], |_| {
            *calls.borrow_mut() += 1;
            TextSample::from("anything")
        });
        assert_eq!(result.intervals, vec![Interval::new(7, 7)]);
        // A single-frame run needs no recognition to stay whole.
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn inverted_candidates_are_dropped_not_emitted() {
        let result = subdivider().subdivide_all(
            vec![Interval::new(9, 4), Interval::new(10, 12)],
            |_| TextSample::from("line"),
        );
        assert_eq!(result.intervals, vec![Interval::new(10, 12)]);
        assert_eq!(result.dropped, vec![Interval::new(9, 4)]);
    }

    #[test]
    fn unsplittable_dissimilar_interval_is_kept_whole() {
        // Endpoint texts differ but every interior frame matches the end
        // text, so the scan finds no boundary above start.
        let sample = |frame: FrameIndex| {
            if frame == 0 {
                TextSample::from("Opening words")
            } else {
                TextSample::from("A totally different thing")
            }
        };
        let result = subdivider().subdivide_all(vec![Interval::new(0, 5)], sample);
        assert_eq!(result.intervals, vec![Interval::new(0, 5)]);
        assert!(result.dropped.is_empty());
    }

    #[test]
    fn empty_samples_split_away_from_text() {
        // Recognition failures surface as empty samples; an empty sample is
        // never similar to real text, so the run splits at the transition.
        let sample = |frame: FrameIndex| {
            if frame <= 2 {
                TextSample::empty()
            } else {
                TextSample::from("Recovered line")
            }
        };
        let result = subdivider().subdivide_all(vec![Interval::new(0, 6)], sample);
        assert_eq!(
            result.intervals,
            vec![Interval::new(0, 2), Interval::new(3, 6)]
        );
    }

    #[test]
    fn each_frame_is_sampled_through_the_callback() {
        let seen = RefCell::new(HashSet::new());
        subdivider().subdivide_all(vec![Interval::new(10, 20)], |frame| {
            seen.borrow_mut().insert(frame);
            two_speakers(frame)
        });
        let seen = seen.borrow();
        // Both endpoints and the scanned boundary frames were visited.
        assert!(seen.contains(&10));
        assert!(seen.contains(&20));
        assert!(seen.contains(&14));
        assert!(seen.contains(&15));
    }
}
