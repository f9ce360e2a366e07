use std::io;
use std::path::{Path, PathBuf};

use hardsub_rip_ocr::FrameArtifact;
use hardsub_rip_types::FrameIndex;
use tempfile::TempDir;

/// Per-run scratch directory holding one cropped image per frame, named by
/// frame index. The directory is deleted when the run ends, on every exit
/// path, unless the caller explicitly keeps it for debugging.
pub struct Scratch {
    dir: TempDir,
}

impl Scratch {
    pub fn new() -> io::Result<Self> {
        let dir = TempDir::with_prefix("hardsub-rip-")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn artifact_path(&self, index: FrameIndex) -> PathBuf {
        self.dir.path().join(format!("{index}.png"))
    }

    pub fn artifact(&self, index: FrameIndex) -> FrameArtifact {
        FrameArtifact::new(index, self.artifact_path(index))
    }

    /// Disables cleanup and returns the directory path.
    pub fn persist(self) -> PathBuf {
        self.dir.keep()
    }
}

#[cfg(test)]
mod tests {
    use super::Scratch;

    #[test]
    fn artifacts_are_named_by_frame_index() {
        let scratch = Scratch::new().unwrap();
        let path = scratch.artifact_path(42);
        assert_eq!(path.file_name().unwrap(), "42.png");
        assert!(path.starts_with(scratch.path()));
    }

    #[test]
    fn dropping_the_scratch_removes_the_directory() {
        let scratch = Scratch::new().unwrap();
        let path = scratch.path().to_path_buf();
        std::fs::write(scratch.artifact_path(0), b"").unwrap();
        drop(scratch);
        assert!(!path.exists());
    }

    #[test]
    fn persisting_keeps_the_directory() {
        let scratch = Scratch::new().unwrap();
        let path = scratch.persist();
        assert!(path.exists());
        std::fs::remove_dir_all(path).unwrap();
    }
}
