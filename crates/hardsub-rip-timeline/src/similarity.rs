use hardsub_rip_types::TextSample;

/// Tuned constant, not derived. Two boundary frames whose concatenated text
/// reaches this ratio are treated as the same spoken line.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Edit-distance based fuzzy comparison of two text samples.
#[derive(Debug, Clone, Copy)]
pub struct Similarity {
    threshold: f32,
}

impl Default for Similarity {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl Similarity {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Normalized closeness of the two samples' concatenated text, in [0, 1].
    pub fn ratio(&self, a: &TextSample, b: &TextSample) -> f32 {
        let a = a.joined();
        let b = b.joined();
        if a.is_empty() && b.is_empty() {
            return 1.0;
        }
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        let a_chars: Vec<char> = a.chars().collect();
        let b_chars: Vec<char> = b.chars().collect();
        let distance = levenshtein_distance(&a_chars, &b_chars);
        let max_len = a_chars.len().max(b_chars.len());
        1.0 - (distance as f32 / max_len as f32)
    }

    /// True when the two samples represent the same spoken line.
    pub fn same_line(&self, a: &TextSample, b: &TextSample) -> bool {
        self.ratio(a, b) >= self.threshold
    }
}

fn levenshtein_distance(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(prev[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut prev, &mut current);
    }

    prev[b.len()]
}
