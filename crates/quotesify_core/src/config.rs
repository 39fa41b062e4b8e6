//! Runtime configuration.
//!
//! Resolution order: built-in defaults, then `QUOTESIFY_*` environment
//! variables. Command-line overrides are applied by the shell.

use crate::logging::{default_log_level, normalize_level};
use crate::storage::{open_storage, Storage, StorageBackend};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_DATA_FILE: &str = "QUOTESIFY_DATA_FILE";
pub const ENV_LOG_DIR: &str = "QUOTESIFY_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "QUOTESIFY_LOG_LEVEL";

const APP_DIR_NAME: &str = "quotesify";
const DEFAULT_DATA_FILE_NAME: &str = "quotesify.json";
const LOG_DIR_NAME: &str = "logs";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no platform data directory; set {ENV_DATA_FILE} and {ENV_LOG_DIR}")]
    NoDataDir,
    #[error("{0}")]
    InvalidLogLevel(String),
    #[error("cannot resolve current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    /// Always absolute.
    pub log_dir: PathBuf,
    pub log_level: &'static str,
}

impl AppConfig {
    /// Defaults overlaid with process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(dirs::data_dir(), |key| std::env::var(key).ok())
    }

    /// Resolves configuration from an explicit base directory and variable
    /// lookup.
    pub fn from_lookup(
        base_dir: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ConfigResult<Self> {
        let app_dir = base_dir.map(|dir| dir.join(APP_DIR_NAME));
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_file = match non_empty(ENV_DATA_FILE) {
            Some(value) => PathBuf::from(value.trim()),
            None => app_dir
                .as_ref()
                .map(|dir| dir.join(DEFAULT_DATA_FILE_NAME))
                .ok_or(ConfigError::NoDataDir)?,
        };
        let log_dir = match non_empty(ENV_LOG_DIR) {
            Some(value) => PathBuf::from(value.trim()),
            None => app_dir
                .as_ref()
                .map(|dir| dir.join(LOG_DIR_NAME))
                .ok_or(ConfigError::NoDataDir)?,
        };
        let log_level = match non_empty(ENV_LOG_LEVEL) {
            Some(value) => normalize_level(&value).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        Ok(Self {
            data_file,
            log_dir: absolutize(log_dir)?,
            log_level,
        })
    }

    pub fn with_data_file(mut self, data_file: impl Into<PathBuf>) -> Self {
        self.data_file = data_file.into();
        self
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> ConfigResult<Self> {
        self.log_dir = absolutize(log_dir.into())?;
        Ok(self)
    }

    pub fn with_log_level(mut self, level: &str) -> ConfigResult<Self> {
        self.log_level = normalize_level(level).map_err(ConfigError::InvalidLogLevel)?;
        Ok(self)
    }

    pub fn storage_backend(&self) -> StorageBackend {
        StorageBackend::for_path(&self.data_file)
    }

    pub fn open_storage(&self) -> Box<dyn Storage> {
        open_storage(self.data_file.clone())
    }
}

fn absolutize(path: PathBuf) -> ConfigResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
    Ok(cwd.join(Path::new(&path)))
}
