use crate::artifact::FrameArtifact;
use crate::error::OcrError;
use crate::response::Recognition;

/// Common interface for all recognition engines.
///
/// `detect` answers whether the frame carries any text at all and is expected
/// to be cheap; `recognize` performs the full, expensive pass.
pub trait RecognitionEngine: Send + Sync {
    fn name(&self) -> &'static str;

    fn warm_up(&self) -> Result<(), OcrError> {
        Ok(())
    }

    fn detect(&self, artifact: &FrameArtifact) -> Result<bool, OcrError>;

    fn recognize(&self, artifact: &FrameArtifact) -> Result<Recognition, OcrError>;
}

/// Placeholder engine used while no real backend is wired.
#[derive(Debug, Default)]
pub struct NoopEngine;

impl RecognitionEngine for NoopEngine {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn detect(&self, _: &FrameArtifact) -> Result<bool, OcrError> {
        Ok(false)
    }

    fn recognize(&self, _: &FrameArtifact) -> Result<Recognition, OcrError> {
        Ok(Recognition::empty())
    }
}
