use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use hardsub_rip_ocr::{BandFilter, OcrError, RecognizerChain};
use hardsub_rip_timeline::{
    Similarity, Subdivider, SignalError, extract_intervals, materialize, render,
};
use hardsub_rip_types::{FrameIndex, Interval, SubtitleEvent, TextSample};
use serde::Serialize;

use crate::acquire::scan_presence;
use crate::diagnostics::RunDiagnostics;
use crate::progress;
use crate::range::{RangeError, RangeMarker, resolve_range};
use crate::scratch::Scratch;
use crate::source::{FrameSource, SourceError};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub start: RangeMarker,
    pub end: RangeMarker,
    pub output: PathBuf,
    pub similarity_threshold: f32,
    pub band_tolerance: f32,
    pub workers: usize,
    pub keep_scratch: bool,
    pub dump_json: Option<PathBuf>,
}

pub struct RunOutcome {
    pub events: usize,
    /// Path of the written track, or `None` when the run found nothing:
    /// either a complete file is written or none at all.
    pub output: Option<PathBuf>,
    pub diagnostics: RunDiagnostics,
    pub scratch_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub enum RunError {
    Source(SourceError),
    Range(RangeError),
    Signal(SignalError),
    Recognizer(OcrError),
    Scratch(std::io::Error),
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Source(err) => write!(f, "{err}"),
            RunError::Range(err) => write!(f, "{err}"),
            RunError::Signal(err) => write!(f, "{err}"),
            RunError::Recognizer(err) => write!(f, "{err}"),
            RunError::Scratch(err) => write!(f, "failed to create scratch directory: {err}"),
            RunError::Output { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for RunError {}

impl From<SourceError> for RunError {
    fn from(err: SourceError) -> Self {
        Self::Source(err)
    }
}

impl From<RangeError> for RunError {
    fn from(err: RangeError) -> Self {
        Self::Range(err)
    }
}

impl From<SignalError> for RunError {
    fn from(err: SignalError) -> Self {
        Self::Signal(err)
    }
}

#[derive(Serialize)]
struct JsonDump<'a> {
    intervals: &'a [Interval],
    events: &'a [SubtitleEvent],
    diagnostics: &'a RunDiagnostics,
}

/// Runs the full reconstruction: artifact extraction, the parallel presence
/// scan, the sequential timeline pass, and the final track write.
pub async fn run(
    source: &dyn FrameSource,
    chain: Arc<RecognizerChain>,
    config: &PipelineConfig,
) -> Result<RunOutcome, RunError> {
    chain.warm_up().map_err(RunError::Recognizer)?;

    // Everything that can be validated happens before any scratch work.
    let metadata = source.metadata()?;
    let range = resolve_range(config.start, config.end, metadata.fps, metadata.frame_count)?;

    let scratch = Scratch::new().map_err(RunError::Scratch)?;
    let mut diagnostics = RunDiagnostics::default();

    let extract_bar = progress::phase_bar("(1/4) extracting frames", range.len(), "frames");
    source.extract(range, &scratch, &|_| extract_bar.inc(1))?;
    extract_bar.finish();

    let scan_bar = progress::phase_bar("(2/4) scanning for subtitles", range.len(), "frames");
    let artifacts = range.frames().map(|index| scratch.artifact(index)).collect();
    let scan = scan_presence(
        Arc::clone(&chain),
        artifacts,
        range.start,
        config.workers,
        |count| scan_bar.inc(count),
    )
    .await;
    scan_bar.finish();
    diagnostics.detection_failures = scan.failures;

    let candidates = extract_intervals(&scan.signal)?;

    let timing_bar = progress::phase_spinner("(3/4) retrieving timings", "recognitions");
    let band = BandFilter::for_frame_width(metadata.width, config.band_tolerance);
    let mut cache: HashMap<FrameIndex, TextSample> = HashMap::new();
    let mut recognition_failures: Vec<FrameIndex> = Vec::new();

    let (intervals, dropped, events) = {
        let mut sample = |frame: FrameIndex| -> TextSample {
            if let Some(hit) = cache.get(&frame) {
                return hit.clone();
            }
            timing_bar.inc(1);
            let sample = match chain.recognize(&scratch.artifact(frame)) {
                Ok(recognition) => band.sample(&recognition),
                Err(_) => {
                    recognition_failures.push(frame);
                    TextSample::empty()
                }
            };
            cache.insert(frame, sample.clone());
            sample
        };

        let subdivider = Subdivider::new(Similarity::new(config.similarity_threshold));
        let subdivision = subdivider.subdivide_all(candidates, &mut sample);
        let events = materialize(&subdivision.intervals, metadata.fps, &mut sample);
        (subdivision.intervals, subdivision.dropped, events)
    };
    timing_bar.finish();

    recognition_failures.sort_unstable();
    recognition_failures.dedup();
    diagnostics.recognition_failures = recognition_failures;
    diagnostics.dropped_intervals = dropped;

    let output = if events.is_empty() {
        None
    } else {
        let track = render(&events);
        tokio::fs::write(&config.output, track)
            .await
            .map_err(|source| RunError::Output {
                path: config.output.clone(),
                source,
            })?;
        Some(config.output.clone())
    };

    if let Some(dump_path) = &config.dump_json {
        let dump = JsonDump {
            intervals: &intervals,
            events: &events,
            diagnostics: &diagnostics,
        };
        let encoded = serde_json::to_vec_pretty(&dump).expect("serializable dump");
        tokio::fs::write(dump_path, encoded)
            .await
            .map_err(|source| RunError::Output {
                path: dump_path.clone(),
                source,
            })?;
    }

    let scratch_dir = if config.keep_scratch {
        Some(scratch.persist())
    } else {
        None
    };

    Ok(RunOutcome {
        events: events.len(),
        output,
        diagnostics,
        scratch_dir,
    })
}
