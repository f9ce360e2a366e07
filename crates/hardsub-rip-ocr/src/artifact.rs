use std::path::{Path, PathBuf};

use hardsub_rip_types::FrameIndex;

/// Reference to one frame's cropped image in the scratch directory.
#[derive(Debug, Clone)]
pub struct FrameArtifact {
    index: FrameIndex,
    path: PathBuf,
}

impl FrameArtifact {
    pub fn new(index: FrameIndex, path: PathBuf) -> Self {
        Self { index, path }
    }

    pub fn index(&self) -> FrameIndex {
        self.index
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
