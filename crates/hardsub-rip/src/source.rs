use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use hardsub_rip_types::FrameIndex;

use crate::range::FrameRange;
use crate::scratch::Scratch;

/// Basic properties of a frame source, gathered before any Stage-1 work.
#[derive(Debug, Clone, Copy)]
pub struct SourceMetadata {
    pub fps: f64,
    pub frame_count: u64,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug)]
pub enum SourceError {
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    Empty {
        path: PathBuf,
    },
    MissingFrame {
        index: FrameIndex,
    },
    Image {
        path: PathBuf,
        message: String,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Unreadable { path, source } => {
                write!(f, "failed to read source {}: {}", path.display(), source)
            }
            SourceError::Empty { path } => {
                write!(f, "source {} contains no frame images", path.display())
            }
            SourceError::MissingFrame { index } => {
                write!(f, "source has no image for frame {index}")
            }
            SourceError::Image { path, message } => {
                write!(f, "failed to process {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Unreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// External collaborator seam: turns some frame store into per-frame cropped
/// artifacts in the scratch directory.
pub trait FrameSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn metadata(&self) -> Result<SourceMetadata, SourceError>;

    /// Writes one artifact per frame in `range` into `scratch`, invoking
    /// `progress` once per completed frame.
    fn extract(
        &self,
        range: FrameRange,
        scratch: &Scratch,
        progress: &dyn Fn(FrameIndex),
    ) -> Result<(), SourceError>;
}

/// Fraction of the frame height where the subtitle band starts.
const BAND_TOP: f64 = 0.8;
/// Horizontal margins trimmed off either side of the band.
const BAND_SIDE_MARGIN: f64 = 0.1;

/// A directory of pre-extracted frame images named by frame index
/// (`1234.png`, `1234.jpg`, ...). Decoding the video itself is out of scope;
/// this is the collaborator most pipelines feed us with.
pub struct ImageDirSource {
    dir: PathBuf,
    fps: f64,
}

impl ImageDirSource {
    pub fn new(dir: PathBuf, fps: f64) -> Self {
        Self { dir, fps }
    }

    fn frame_files(&self) -> Result<BTreeMap<FrameIndex, PathBuf>, SourceError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| SourceError::Unreadable {
            path: self.dir.clone(),
            source,
        })?;
        let mut frames = BTreeMap::new();
        for entry in entries {
            let entry = entry.map_err(|source| SourceError::Unreadable {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            let Some(index) = numeric_stem(&path) else {
                continue;
            };
            if matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("png" | "jpg" | "jpeg")
            ) {
                frames.insert(index, path);
            }
        }
        if frames.is_empty() {
            return Err(SourceError::Empty {
                path: self.dir.clone(),
            });
        }
        Ok(frames)
    }
}

fn numeric_stem(path: &Path) -> Option<FrameIndex> {
    path.file_stem()?.to_str()?.parse().ok()
}

impl FrameSource for ImageDirSource {
    fn name(&self) -> &'static str {
        "image-dir"
    }

    fn metadata(&self) -> Result<SourceMetadata, SourceError> {
        let frames = self.frame_files()?;
        let (_, first) = frames.iter().next().expect("frame_files is non-empty");
        let (width, height) =
            image::image_dimensions(first).map_err(|err| SourceError::Image {
                path: first.clone(),
                message: err.to_string(),
            })?;
        let frame_count = frames.keys().next_back().copied().unwrap_or(0) + 1;
        Ok(SourceMetadata {
            fps: self.fps,
            frame_count,
            width,
            height,
        })
    }

    fn extract(
        &self,
        range: FrameRange,
        scratch: &Scratch,
        progress: &dyn Fn(FrameIndex),
    ) -> Result<(), SourceError> {
        let frames = self.frame_files()?;
        for index in range.frames() {
            let path = frames
                .get(&index)
                .ok_or(SourceError::MissingFrame { index })?;
            let frame = image::open(path).map_err(|err| SourceError::Image {
                path: path.clone(),
                message: err.to_string(),
            })?;
            let (width, height) = (frame.width(), frame.height());
            let band_top = (height as f64 * BAND_TOP) as u32;
            let band_left = (width as f64 * BAND_SIDE_MARGIN) as u32;
            let band_width = width.saturating_sub(band_left * 2).max(1);
            let band_height = height.saturating_sub(band_top).max(1);
            let cropped = frame.crop_imm(band_left, band_top, band_width, band_height);
            let target = scratch.artifact_path(index);
            cropped.save(&target).map_err(|err| SourceError::Image {
                path: target,
                message: err.to_string(),
            })?;
            progress(index);
        }
        Ok(())
    }
}

/// Synthesizes blank artifacts at a fixed frame rate; the deterministic
/// stand-in used by tests and demos alongside a scripted engine.
pub struct MockSource {
    metadata: SourceMetadata,
}

impl MockSource {
    pub fn new(fps: f64, frame_count: u64) -> Self {
        Self {
            metadata: SourceMetadata {
                fps,
                frame_count,
                width: 640,
                height: 360,
            },
        }
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new(30.0, 120)
    }
}

impl FrameSource for MockSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn metadata(&self) -> Result<SourceMetadata, SourceError> {
        Ok(self.metadata)
    }

    fn extract(
        &self,
        range: FrameRange,
        scratch: &Scratch,
        progress: &dyn Fn(FrameIndex),
    ) -> Result<(), SourceError> {
        for index in range.frames() {
            let path = scratch.artifact_path(index);
            fs::write(&path, []).map_err(|source| SourceError::Unreadable {
                path,
                source,
            })?;
            progress(index);
        }
        Ok(())
    }
}
