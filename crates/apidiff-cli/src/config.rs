//! `apidiff.toml` loading and flag precedence.
//!
//! Values come from built-in defaults, then the config file, then flags.

use std::path::Path;

use apidiff_core::errors::{ApiDiffError, ExError};
use apidiff_core::policy::SurfacePolicy;
use apidiff_engine::CheckOptions;
use clap::ValueEnum;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "apidiff.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Contents of a config file; every key is optional
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base: Option<String>,
    pub include_unexported_receivers: Option<bool>,
    pub jobs: Option<usize>,
    pub format: Option<OutputFormat>,
    pub excluded_segments: Option<Vec<String>>,
}

/// Values given on the command line
#[derive(Debug, Default)]
pub struct Overrides {
    pub base: Option<String>,
    /// Only `true` overrides; the flag cannot switch the file setting off
    pub include_unexported_receivers: bool,
    pub jobs: Option<usize>,
    pub format: Option<OutputFormat>,
}

/// Fully resolved settings for one run
#[derive(Debug)]
pub struct Settings {
    pub options: CheckOptions,
    pub format: OutputFormat,
}

/// Read `explicit`, or `apidiff.toml` under `dir` if it exists.
///
/// # Errors
///
/// Returns a `Config` error when an explicit file is missing or any file is
/// unreadable or invalid.
pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<FileConfig, ExError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = dir.join(DEFAULT_CONFIG_FILE);
            if !default.is_file() {
                return Ok(FileConfig::default());
            }
            default
        }
    };

    let raw = std::fs::read_to_string(&path).map_err(|e| config_error(&path, e))?;
    parse(&raw).map_err(|e| config_error(&path, e))
}

fn parse(raw: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(raw)
}

fn config_error(path: &Path, err: impl std::fmt::Display) -> ExError {
    ApiDiffError::Config {
        message: format!("{}: {}", path.display(), err),
    }
    .into()
}

/// Layer flags over the file over the defaults
pub fn resolve(file: FileConfig, flags: Overrides) -> Settings {
    let defaults = CheckOptions::default();
    let include_unexported_receivers =
        flags.include_unexported_receivers || file.include_unexported_receivers.unwrap_or(false);

    Settings {
        options: CheckOptions {
            base_ref: flags.base.or(file.base).unwrap_or(defaults.base_ref),
            jobs: flags.jobs.or(file.jobs).unwrap_or(defaults.jobs),
            excluded_segments: file
                .excluded_segments
                .unwrap_or(defaults.excluded_segments),
            policy: SurfacePolicy::default()
                .with_unexported_receivers(include_unexported_receivers),
        },
        format: flags.format.or(file.format).unwrap_or_default(),
    }
}
