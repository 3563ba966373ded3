//! Core domain: loader for RON tuning files read at startup.

use bevy::prelude::*;
use ron::Options;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory holding the tuning files, relative to the working directory.
pub const CONFIG_DIR: &str = "assets/config";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a single RON struct. `path` is only used for error reporting.
pub fn parse_config<T>(contents: &str, path: &Path) -> Result<T, ConfigLoadError>
where
    T: DeserializeOwned,
{
    ron_options()
        .from_str(contents)
        .map_err(|source| ConfigLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

pub fn load_config<T>(path: &Path) -> Result<T, ConfigLoadError>
where
    T: DeserializeOwned,
{
    let contents = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(&contents, path)
}

/// Load `file_name` from [`CONFIG_DIR`], falling back to `T::default()` when the
/// file is missing or malformed.
pub fn load_config_or_default<T>(file_name: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let path = Path::new(CONFIG_DIR).join(file_name);
    match load_config(&path) {
        Ok(config) => {
            info!("Loaded tuning from {}", path.display());
            config
        }
        Err(e) => {
            warn!("{e}; using built-in defaults");
            T::default()
        }
    }
}

/// Replace a non-finite value with `fallback`, then clamp it to `min..=max`.
pub fn sanitize(value: f32, fallback: f32, min: f32, max: f32) -> f32 {
    let value = if value.is_finite() { value } else { fallback };
    value.clamp(min, max)
}
