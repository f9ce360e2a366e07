/// Recognition result for a single text line in a frame.
#[derive(Debug, Clone)]
pub struct RecognizedLine {
    pub text: String,
    /// Horizontal center of the line's bounding region, in pixels.
    pub center_x: f32,
    pub confidence: Option<f32>,
}

impl RecognizedLine {
    pub fn new(text: impl Into<String>, center_x: f32) -> Self {
        Self {
            text: text.into(),
            center_x,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, value: f32) -> Self {
        self.confidence = Some(value);
        self
    }
}

/// Collection of recognized lines for one frame, in reading order.
#[derive(Debug, Clone, Default)]
pub struct Recognition {
    pub lines: Vec<RecognizedLine>,
}

impl Recognition {
    pub fn new(lines: Vec<RecognizedLine>) -> Self {
        Self { lines }
    }

    pub fn empty() -> Self {
        Self { lines: Vec::new() }
    }
}
