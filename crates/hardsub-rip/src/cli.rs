use std::path::PathBuf;

use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum};

use crate::range::RangeMarker;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum SourceKind {
    ImageDir,
    Mock,
}

/// Which settings were actually supplied on the command line, as opposed to
/// filled in by clap defaults. Config-file values only yield to real CLI
/// input.
#[derive(Debug, Default)]
pub struct CliSources {
    pub source_from_cli: bool,
    pub fps_from_cli: bool,
    pub similarity_threshold_from_cli: bool,
    pub band_tolerance_from_cli: bool,
    pub workers_from_cli: bool,
    pub keep_scratch_from_cli: bool,
}

impl CliSources {
    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            source_from_cli: value_from_cli(matches, "source"),
            fps_from_cli: value_from_cli(matches, "fps"),
            similarity_threshold_from_cli: value_from_cli(matches, "similarity_threshold"),
            band_tolerance_from_cli: value_from_cli(matches, "band_tolerance"),
            workers_from_cli: value_from_cli(matches, "workers"),
            keep_scratch_from_cli: value_from_cli(matches, "keep_scratch"),
        }
    }
}

fn value_from_cli(matches: &ArgMatches, id: &str) -> bool {
    matches
        .value_source(id)
        .is_some_and(|source| matches!(source, ValueSource::CommandLine))
}

pub fn parse_cli() -> (CliArgs, CliSources) {
    let command = CliArgs::command();
    let matches = command.get_matches();
    let args = match CliArgs::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(err) => err.exit(),
    };
    let sources = CliSources::from_matches(&matches);
    (args, sources)
}

#[derive(Debug, Parser)]
#[command(
    name = "hardsub-rip",
    about = "Reconstruct timed subtitle events from hardsubbed video frames",
    disable_help_subcommand = true
)]
pub struct CliArgs {
    /// Frame source path (a directory of extracted frame images)
    pub input: PathBuf,

    /// Start of the frame range: frame number, [HH:]MM:SS, or `default`
    #[arg(default_value = "default")]
    pub start: RangeMarker,

    /// End of the frame range (exclusive): frame number, [HH:]MM:SS, or `default`
    #[arg(default_value = "default")]
    pub end: RangeMarker,

    /// Output path for the subtitle track (defaults to the input stem + .srt)
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Override the configuration file path
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Frame source backend
    #[arg(long = "source", id = "source", value_enum, default_value_t = SourceKind::ImageDir)]
    pub source: SourceKind,

    /// Source frame rate, used when the source itself carries none
    #[arg(long = "fps", id = "fps", default_value_t = 30.0)]
    pub fps: f64,

    /// Similarity ratio at which two boundary frames count as the same line
    #[arg(
        long = "similarity-threshold",
        id = "similarity_threshold",
        default_value_t = 0.5
    )]
    pub similarity_threshold: f32,

    /// Horizontal tolerance in pixels for the subtitle band filter
    #[arg(long = "band-tolerance", id = "band_tolerance", default_value_t = 150.0)]
    pub band_tolerance: f32,

    /// Presence-scan worker count (capped by available parallelism)
    #[arg(
        long = "workers",
        id = "workers",
        default_value_t = 4,
        value_parser = clap::value_parser!(usize)
    )]
    pub workers: usize,

    /// Write intervals, events, and diagnostics as JSON next to the track
    #[arg(long = "dump-json", value_name = "FILE")]
    pub dump_json: Option<PathBuf>,

    /// Keep the scratch directory instead of deleting it on exit
    #[arg(long = "keep-scratch", id = "keep_scratch")]
    pub keep_scratch: bool,
}
