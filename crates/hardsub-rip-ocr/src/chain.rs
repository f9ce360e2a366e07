use std::sync::Arc;

use crate::artifact::FrameArtifact;
use crate::engine::RecognitionEngine;
use crate::error::OcrError;
use crate::response::Recognition;

/// Ordered fallback chain of recognition engines.
///
/// The first engine is the fast one and alone answers `detect`; `recognize`
/// walks the chain until an engine succeeds. When every engine has failed the
/// chain reports `OcrError::Exhausted` and the caller decides how to degrade.
pub struct RecognizerChain {
    engines: Vec<Arc<dyn RecognitionEngine>>,
}

impl RecognizerChain {
    pub fn new(engines: Vec<Arc<dyn RecognitionEngine>>) -> Self {
        assert!(!engines.is_empty(), "recognizer chain requires an engine");
        Self { engines }
    }

    pub fn single(engine: Arc<dyn RecognitionEngine>) -> Self {
        Self::new(vec![engine])
    }

    pub fn warm_up(&self) -> Result<(), OcrError> {
        for engine in &self.engines {
            engine.warm_up()?;
        }
        Ok(())
    }

    pub fn engine_names(&self) -> Vec<&'static str> {
        self.engines.iter().map(|engine| engine.name()).collect()
    }

    /// Presence scan. Uses the fast engine only; detection never falls back.
    pub fn detect(&self, artifact: &FrameArtifact) -> Result<bool, OcrError> {
        self.engines[0].detect(artifact)
    }

    /// Full recognition with fallback across the chain.
    pub fn recognize(&self, artifact: &FrameArtifact) -> Result<Recognition, OcrError> {
        let mut attempts = 0usize;
        for engine in &self.engines {
            attempts += 1;
            match engine.recognize(artifact) {
                Ok(recognition) => return Ok(recognition),
                Err(err) if err.is_recoverable() => continue,
                Err(OcrError::Backend { .. }) => continue,
                Err(err) => return Err(err),
            }
        }
        Err(OcrError::Exhausted {
            index: artifact.index(),
            attempts,
        })
    }
}
