//! Configuration file discovery and loading.
//!
//! Without `--config` the first existing file among the search paths wins and
//! a missing file means defaults. A path given with `--config` must exist.

use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Project-local config file, checked first.
pub const LOCAL_CONFIG_FILE: &str = ".tripdesk.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    /// Optional files, first existing one wins.
    Search(Vec<PathBuf>),
    /// A file named on the command line.
    Explicit(PathBuf),
}

/// Locates and parses the tripdesk config file.
#[derive(Debug)]
pub struct ConfigLoader {
    source: ConfigSource,
}

impl ConfigLoader {
    /// Search `./.tripdesk.toml`, then `<config_dir>/tripdesk/config.toml`.
    #[must_use]
    pub fn new() -> Self {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("tripdesk").join("config.toml"));
        }
        Self {
            source: ConfigSource::Search(paths),
        }
    }

    /// Load only `path`. Unlike the search list, the file is required.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            source: ConfigSource::Explicit(path),
        }
    }

    /// Loader for the `--config` flag: explicit when given, search otherwise.
    #[must_use]
    pub fn from_cli(path: Option<PathBuf>) -> Self {
        path.map_or_else(Self::new, Self::with_path)
    }

    /// Load the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if an explicit file cannot be read,
    /// and [`ConfigError::ParseError`] if a file is not valid TOML.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        match &self.source {
            ConfigSource::Explicit(path) => {
                tracing::debug!(path = %path.display(), "Loading config file from --config");
                read_config(path)
            }
            ConfigSource::Search(paths) => match paths.iter().find(|p| p.is_file()) {
                Some(path) => {
                    tracing::debug!(path = %path.display(), "Loading config file");
                    read_config(path)
                }
                None => {
                    tracing::debug!("No config file found, using defaults");
                    Ok(AppConfig::default())
                }
            },
        }
    }

    /// Whether a missing file is an error rather than a fallback to defaults.
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(self.source, ConfigSource::Explicit(_))
    }

    /// Candidate files, in the order they are tried.
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        match &self.source {
            ConfigSource::Search(paths) => paths,
            ConfigSource::Explicit(path) => std::slice::from_ref(path),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}
