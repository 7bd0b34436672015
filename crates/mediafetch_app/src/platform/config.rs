//! Application configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, a RON file
//! (`--config <path>` or `./mediafetch.ron`), then command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use fetch_logging::LogDestination;
use log::LevelFilter;
use mediafetch_engine::BackendSettings;
use serde::Deserialize;
use thiserror::Error;

use super::cli::Cli;

pub const DEFAULT_CONFIG_FILE: &str = "./mediafetch.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("unknown log destination {0:?} (expected file, terminal or both)")]
    LogDestination(String),
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub output_dir: PathBuf,
    pub connect_timeout_secs: u64,
    /// `None` or `Some(0)` leaves requests unbounded.
    pub request_timeout_secs: Option<u64>,
    pub max_bytes: u64,
    pub log_destination: String,
    pub log_level: String,
    pub log_file: PathBuf,
    /// File the values were read from; `None` for built-in defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let backend = BackendSettings::default();
        Self {
            backend_url: backend.base_url,
            output_dir: PathBuf::from("./downloads"),
            connect_timeout_secs: backend.connect_timeout.as_secs(),
            request_timeout_secs: backend.request_timeout.map(|timeout| timeout.as_secs()),
            max_bytes: backend.max_bytes,
            log_destination: "file".to_string(),
            log_level: "info".to_string(),
            log_file: PathBuf::from(fetch_logging::DEFAULT_LOG_FILE),
            source: None,
        }
    }
}

impl AppConfig {
    /// Loads the file named on the command line, else the default file if it
    /// exists, else defaults; then applies the command-line overrides.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_overrides(cli);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(url) = &cli.backend_url {
            self.backend_url = url.clone();
        }
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(secs) = cli.timeout {
            self.request_timeout_secs = Some(secs);
        }
        if let Some(destination) = &cli.log {
            self.log_destination = destination.clone();
        }
        if cli.verbose {
            self.log_level = "debug".to_string();
        }
    }

    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            base_url: self.backend_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self
                .request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            max_bytes: self.max_bytes,
            ..BackendSettings::default()
        }
    }

    pub fn log_destination(&self) -> Result<LogDestination, ConfigError> {
        LogDestination::from_name(&self.log_destination)
            .ok_or_else(|| ConfigError::LogDestination(self.log_destination.clone()))
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}
