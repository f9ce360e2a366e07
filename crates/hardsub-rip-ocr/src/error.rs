use std::path::PathBuf;

use hardsub_rip_types::FrameIndex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("failed to read frame artifact {path}: {source}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("backend error: {message}")]
    Backend { message: String },
    #[error("recognition chain exhausted for frame {index} after {attempts} attempt(s)")]
    Exhausted { index: FrameIndex, attempts: usize },
}

impl OcrError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Per-frame failures degrade to an empty sample; everything else aborts.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }
}
