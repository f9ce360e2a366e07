use hardsub_rip_types::TextSample;

use crate::response::Recognition;

/// Default horizontal tolerance in pixels. Hardsubs don't drift far from the
/// center of the picture; this is an empirically chosen constant.
pub const DEFAULT_TOLERANCE: f32 = 150.0;

/// Keeps only recognized lines whose horizontal center lies close enough to
/// the frame's middle line.
#[derive(Debug, Clone, Copy)]
pub struct BandFilter {
    middle_line: f32,
    tolerance: f32,
}

impl BandFilter {
    pub fn new(middle_line: f32, tolerance: f32) -> Self {
        Self {
            middle_line,
            tolerance,
        }
    }

    /// Middle line derived from the frame width the way the recognizer sees
    /// it after cropping.
    pub fn for_frame_width(width: u32, tolerance: f32) -> Self {
        Self::new(0.4 * width as f32, tolerance)
    }

    pub fn middle_line(&self) -> f32 {
        self.middle_line
    }

    pub fn accepts(&self, center_x: f32) -> bool {
        (center_x - self.middle_line).abs() < self.tolerance
    }

    pub fn sample(&self, recognition: &Recognition) -> TextSample {
        let lines = recognition
            .lines
            .iter()
            .filter(|line| self.accepts(line.center_x))
            .map(|line| line.text.clone())
            .collect();
        TextSample::new(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::{BandFilter, DEFAULT_TOLERANCE};
    use crate::response::{Recognition, RecognizedLine};

    #[test]
    fn filter_drops_off_center_lines() {
        let filter = BandFilter::for_frame_width(1920, DEFAULT_TOLERANCE);
        let recognition = Recognition::new(vec![
            RecognizedLine::new("dialogue", 768.0),
            RecognizedLine::new("watermark", 60.0),
            RecognizedLine::new("second line", 700.0),
        ]);
        let sample = filter.sample(&recognition);
        assert_eq!(sample.lines(), ["dialogue", "second line"]);
    }

    #[test]
    fn tolerance_is_exclusive_at_the_edge() {
        let filter = BandFilter::new(400.0, 150.0);
        assert!(filter.accepts(549.9));
        assert!(!filter.accepts(550.0));
    }
}
