use std::process::ExitCode;
use std::sync::Arc;

use hardsub_rip_ocr::{NoopEngine, RecognizerChain};

use hardsub_rip::cli::{SourceKind, parse_cli};
use hardsub_rip::pipeline::{self, PipelineConfig};
use hardsub_rip::settings::resolve_settings;
use hardsub_rip::source::{FrameSource, ImageDirSource, MockSource};

/// Frame count advertised by the mock source when nothing real backs it.
const MOCK_FRAME_COUNT: u64 = 120;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    let (args, cli_sources) = parse_cli();
    let settings = match resolve_settings(&args, &cli_sources) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("hardsub-rip: {err}");
            return ExitCode::from(2);
        }
    };

    let source: Box<dyn FrameSource> = match settings.source {
        SourceKind::ImageDir => Box::new(ImageDirSource::new(args.input.clone(), settings.fps)),
        SourceKind::Mock => Box::new(MockSource::new(settings.fps, MOCK_FRAME_COUNT)),
    };
    let chain = Arc::new(RecognizerChain::single(Arc::new(NoopEngine)));

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("srt"));
    let config = PipelineConfig {
        start: args.start,
        end: args.end,
        output,
        similarity_threshold: settings.similarity_threshold,
        band_tolerance: settings.band_tolerance,
        workers: settings.workers,
        keep_scratch: settings.keep_scratch,
        dump_json: args.dump_json.clone(),
    };

    let outcome = match pipeline::run(source.as_ref(), chain, &config).await {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("hardsub-rip: {err}");
            return ExitCode::from(1);
        }
    };

    match &outcome.output {
        Some(path) => println!(
            "{} subtitle event(s) written to {}",
            outcome.events,
            path.display()
        ),
        None => println!("no subtitle events found; nothing written"),
    }
    if let Some(dir) = &outcome.scratch_dir {
        println!("scratch kept at {}", dir.display());
    }
    if !outcome.diagnostics.is_clean() {
        eprintln!("{}", outcome.diagnostics.summary());
    }
    ExitCode::SUCCESS
}
