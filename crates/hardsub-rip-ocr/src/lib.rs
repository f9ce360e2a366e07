mod artifact;
mod band;
mod chain;
mod engine;
mod error;
mod response;
mod scripted;

pub use artifact::FrameArtifact;
pub use band::{BandFilter, DEFAULT_TOLERANCE};
pub use chain::RecognizerChain;
pub use engine::{NoopEngine, RecognitionEngine};
pub use error::OcrError;
pub use response::{Recognition, RecognizedLine};
pub use scripted::ScriptedEngine;
