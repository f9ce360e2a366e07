use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::cli::{CliArgs, CliSources, SourceKind};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    source: Option<String>,
    fps: Option<f64>,
    similarity_threshold: Option<f32>,
    band_tolerance: Option<f32>,
    workers: Option<usize>,
    keep_scratch: Option<bool>,
}

/// Settings after merging CLI arguments over the config file. CLI values win
/// only when they were actually typed on the command line.
#[derive(Debug)]
pub struct EffectiveSettings {
    pub source: SourceKind,
    pub fps: f64,
    pub similarity_threshold: f32,
    pub band_tolerance: f32,
    pub workers: usize,
    pub keep_scratch: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    InvalidValue {
        field: &'static str,
        value: String,
    },
    NotFound {
        path: PathBuf,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(
                    f,
                    "failed to read config file {}: {}",
                    path.display(),
                    source
                )
            }
            ConfigError::Parse { path, source } => {
                write!(
                    f,
                    "failed to parse config file {}: {}",
                    path.display(),
                    source
                )
            }
            ConfigError::InvalidValue { field, value } => {
                write!(f, "invalid value '{value}' for '{field}'")
            }
            ConfigError::NotFound { path } => {
                write!(f, "config file {} does not exist", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub fn resolve_settings(
    cli: &CliArgs,
    sources: &CliSources,
) -> Result<EffectiveSettings, ConfigError> {
    let file = load_config(cli.config.as_deref())?;
    merge(cli, sources, file)
}

fn load_config(path_override: Option<&Path>) -> Result<FileConfig, ConfigError> {
    if let Some(path) = path_override {
        let path = path.to_path_buf();
        if !path.exists() {
            return Err(ConfigError::NotFound { path });
        }
        return read_config(&path);
    }

    let Some(default_path) = default_config_path() else {
        return Ok(FileConfig::default());
    };
    if !default_path.exists() {
        return Ok(FileConfig::default());
    }
    read_config(&default_path)
}

fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn default_config_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "hardsub-rip")?;
    Some(dirs.config_dir().join("config.toml"))
}

fn merge(
    cli: &CliArgs,
    sources: &CliSources,
    file: FileConfig,
) -> Result<EffectiveSettings, ConfigError> {
    let source = if sources.source_from_cli {
        cli.source
    } else if let Some(name) = file.source.as_deref() {
        parse_source_kind(name)?
    } else {
        cli.source
    };

    let fps = pick(sources.fps_from_cli, cli.fps, file.fps);
    if !(fps.is_finite() && fps > 0.0) {
        return Err(ConfigError::InvalidValue {
            field: "fps",
            value: fps.to_string(),
        });
    }

    let similarity_threshold = pick(
        sources.similarity_threshold_from_cli,
        cli.similarity_threshold,
        file.similarity_threshold,
    );
    if !(0.0..=1.0).contains(&similarity_threshold) {
        return Err(ConfigError::InvalidValue {
            field: "similarity_threshold",
            value: similarity_threshold.to_string(),
        });
    }

    let band_tolerance = pick(
        sources.band_tolerance_from_cli,
        cli.band_tolerance,
        file.band_tolerance,
    );
    if band_tolerance <= 0.0 {
        return Err(ConfigError::InvalidValue {
            field: "band_tolerance",
            value: band_tolerance.to_string(),
        });
    }

    let workers = pick(sources.workers_from_cli, cli.workers, file.workers);
    if workers == 0 {
        return Err(ConfigError::InvalidValue {
            field: "workers",
            value: "0".into(),
        });
    }

    let keep_scratch = pick(
        sources.keep_scratch_from_cli,
        cli.keep_scratch,
        file.keep_scratch,
    );

    Ok(EffectiveSettings {
        source,
        fps,
        similarity_threshold,
        band_tolerance,
        workers,
        keep_scratch,
    })
}

fn pick<T>(from_cli: bool, cli_value: T, file_value: Option<T>) -> T {
    if from_cli {
        cli_value
    } else {
        file_value.unwrap_or(cli_value)
    }
}

fn parse_source_kind(name: &str) -> Result<SourceKind, ConfigError> {
    match name.to_ascii_lowercase().as_str() {
        "image-dir" => Ok(SourceKind::ImageDir),
        "mock" => Ok(SourceKind::Mock),
        other => Err(ConfigError::InvalidValue {
            field: "source",
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{FileConfig, merge, parse_source_kind};
    use crate::cli::{CliArgs, CliSources, SourceKind};
    use clap::Parser;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["hardsub-rip", "frames"];
        argv.extend_from_slice(extra);
        CliArgs::parse_from(argv)
    }

    #[test]
    fn cli_defaults_apply_without_a_config_file() {
        let settings = merge(&args(&[]), &CliSources::default(), FileConfig::default()).unwrap();
        assert_eq!(settings.source, SourceKind::ImageDir);
        assert_eq!(settings.fps, 30.0);
        assert_eq!(settings.similarity_threshold, 0.5);
        assert_eq!(settings.band_tolerance, 150.0);
        assert!(!settings.keep_scratch);
    }

    #[test]
    fn file_values_override_defaults_but_not_cli_input() {
        let file = FileConfig {
            fps: Some(23.976),
            similarity_threshold: Some(0.7),
            ..FileConfig::default()
        };
        let sources = CliSources {
            similarity_threshold_from_cli: true,
            ..CliSources::default()
        };
        let settings = merge(
            &args(&["--similarity-threshold", "0.4"]),
            &sources,
            file,
        )
        .unwrap();
        assert_eq!(settings.fps, 23.976);
        assert_eq!(settings.similarity_threshold, 0.4);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let file = FileConfig {
            similarity_threshold: Some(1.5),
            ..FileConfig::default()
        };
        assert!(merge(&args(&[]), &CliSources::default(), file).is_err());

        let file = FileConfig {
            fps: Some(0.0),
            ..FileConfig::default()
        };
        assert!(merge(&args(&[]), &CliSources::default(), file).is_err());
    }

    #[test]
    fn source_names_parse_like_the_cli_enum() {
        assert_eq!(parse_source_kind("image-dir").unwrap(), SourceKind::ImageDir);
        assert_eq!(parse_source_kind("Mock").unwrap(), SourceKind::Mock);
        assert!(parse_source_kind("ffmpeg").is_err());
    }
}
