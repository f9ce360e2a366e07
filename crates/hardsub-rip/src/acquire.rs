use std::sync::Arc;

use futures_util::StreamExt;
use hardsub_rip_ocr::{FrameArtifact, RecognizerChain};
use hardsub_rip_timeline::PresenceSignal;
use hardsub_rip_types::FrameIndex;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

const WORKER_CHANNEL_CAPACITY: usize = 2;

struct ScanJob {
    seq: usize,
    artifact: FrameArtifact,
}

struct OrderedDetection {
    seq: usize,
    frame: FrameIndex,
    present: Result<bool, hardsub_rip_ocr::OcrError>,
}

/// Outcome of the Stage-1 presence scan.
pub struct PresenceScan {
    pub signal: PresenceSignal,
    /// Frames whose detection call failed; treated as absent.
    pub failures: Vec<FrameIndex>,
}

fn effective_workers(requested: usize) -> usize {
    let cap = std::thread::available_parallelism()
        .map(|count| count.get())
        .unwrap_or(1);
    requested.clamp(1, cap)
}

/// Runs `detect` for every artifact across a bounded worker pool.
///
/// Jobs carry a sequence number and results are reassembled positionally, so
/// worker completion order never matters; the signal is indexed, not
/// streamed. Per-frame detection failures degrade to "absent" and are
/// reported for the end-of-run summary.
pub async fn scan_presence(
    chain: Arc<RecognizerChain>,
    artifacts: Vec<FrameArtifact>,
    offset: FrameIndex,
    workers: usize,
    progress: impl Fn(u64),
) -> PresenceScan {
    let total = artifacts.len();
    let worker_count = effective_workers(workers);

    let (result_tx, result_rx) =
        mpsc::channel::<OrderedDetection>(worker_count * WORKER_CHANNEL_CAPACITY);
    let mut worker_inputs = Vec::with_capacity(worker_count);

    for _ in 0..worker_count {
        let (job_tx, mut job_rx) = mpsc::channel::<ScanJob>(WORKER_CHANNEL_CAPACITY);
        worker_inputs.push(job_tx);
        let chain = Arc::clone(&chain);
        let result_tx = result_tx.clone();
        tokio::spawn(async move {
            while let Some(job) = job_rx.recv().await {
                let present = chain.detect(&job.artifact);
                let detection = OrderedDetection {
                    seq: job.seq,
                    frame: job.artifact.index(),
                    present,
                };
                if result_tx.send(detection).await.is_err() {
                    return;
                }
            }
        });
    }
    drop(result_tx);

    tokio::spawn(async move {
        for (seq, artifact) in artifacts.into_iter().enumerate() {
            let slot = seq % worker_inputs.len();
            if worker_inputs[slot].send(ScanJob { seq, artifact }).await.is_err() {
                return;
            }
        }
    });

    let mut values = vec![false; total];
    let mut failures = Vec::new();
    let mut results = ReceiverStream::new(result_rx);
    while let Some(detection) = results.next().await {
        match detection.present {
            Ok(present) => values[detection.seq] = present,
            Err(_) => failures.push(detection.frame),
        }
        progress(1);
    }
    failures.sort_unstable();

    PresenceScan {
        signal: PresenceSignal::new(offset, values),
        failures,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use super::scan_presence;
    use hardsub_rip_ocr::{FrameArtifact, OcrError, Recognition, RecognizerChain, ScriptedEngine};
    use hardsub_rip_timeline::extract_intervals;
    use hardsub_rip_types::Interval;

    fn artifacts(range: std::ops::Range<u64>) -> Vec<FrameArtifact> {
        range
            .map(|index| FrameArtifact::new(index, PathBuf::from(format!("{index}.png"))))
            .collect()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn scan_reassembles_results_in_frame_order() {
        let engine = ScriptedEngine::new(
            |frame| Ok((10..=14).contains(&frame) || frame == 20),
            |_| Ok(Recognition::empty()),
        );
        let chain = Arc::new(RecognizerChain::single(Arc::new(engine)));
        let scan = scan_presence(chain, artifacts(5..25), 5, 4, |_| {}).await;

        assert_eq!(scan.signal.offset(), 5);
        assert_eq!(scan.signal.len(), 20);
        assert!(scan.failures.is_empty());
        let intervals = extract_intervals(&scan.signal).unwrap();
        assert_eq!(intervals, vec![Interval::new(10, 14), Interval::new(20, 20)]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn detect_failures_degrade_to_absent() {
        let engine = ScriptedEngine::new(
            |frame| {
                if frame == 3 {
                    Err(OcrError::backend("detector crashed"))
                } else {
                    Ok(true)
                }
            },
            |_| Ok(Recognition::empty()),
        );
        let chain = Arc::new(RecognizerChain::single(Arc::new(engine)));
        let scan = scan_presence(chain, artifacts(0..6), 0, 2, |_| {}).await;

        assert_eq!(scan.failures, vec![3]);
        let intervals = extract_intervals(&scan.signal).unwrap();
        assert_eq!(intervals, vec![Interval::new(0, 2), Interval::new(4, 5)]);
    }
}
