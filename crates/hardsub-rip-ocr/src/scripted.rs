use hardsub_rip_types::FrameIndex;

use crate::artifact::FrameArtifact;
use crate::engine::RecognitionEngine;
use crate::error::OcrError;
use crate::response::Recognition;

type DetectFn = dyn Fn(FrameIndex) -> Result<bool, OcrError> + Send + Sync;
type RecognizeFn = dyn Fn(FrameIndex) -> Result<Recognition, OcrError> + Send + Sync;

/// Closure-backed engine for tests and demos.
///
/// Plays the same role as a mock decoder backend: a deterministic stand-in
/// for the expensive external recognizer, keyed by frame index so the frame
/// artifact on disk never has to hold real pixels.
pub struct ScriptedEngine {
    detect: Box<DetectFn>,
    recognize: Box<RecognizeFn>,
}

impl ScriptedEngine {
    pub fn new<D, R>(detect: D, recognize: R) -> Self
    where
        D: Fn(FrameIndex) -> Result<bool, OcrError> + Send + Sync + 'static,
        R: Fn(FrameIndex) -> Result<Recognition, OcrError> + Send + Sync + 'static,
    {
        Self {
            detect: Box::new(detect),
            recognize: Box::new(recognize),
        }
    }
}

impl RecognitionEngine for ScriptedEngine {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn detect(&self, artifact: &FrameArtifact) -> Result<bool, OcrError> {
        (self.detect)(artifact.index())
    }

    fn recognize(&self, artifact: &FrameArtifact) -> Result<Recognition, OcrError> {
        (self.recognize)(artifact.index())
    }
}
