//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `config.toml`. A missing or empty file means
//! "all defaults"; a file that exists but does not parse is an error, since
//! silently ignoring a typo in the storage key would orphan the saved profile.

use std::path::{Path, PathBuf};

use remainders_core::config::AppConfig;
use remainders_core::error::{RemaindersError, Result};

use crate::paths::RemaindersPaths;
use crate::storage::{AtomicFile, AtomicFileError};

/// Reads and writes the application configuration file.
pub struct ConfigService {
    file: AtomicFile<AppConfig>,
}

impl ConfigService {
    /// Uses the platform config file (`~/.config/remainders/config.toml`).
    pub fn new(paths: &RemaindersPaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| RemaindersError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Uses an explicit config file.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::toml(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Loads the configuration, falling back to defaults when absent.
    pub fn load(&self) -> Result<AppConfig> {
        match self.file.load() {
            Ok(Some(config)) => {
                tracing::debug!("[ConfigService] loaded {:?}", self.file.path());
                Ok(config)
            }
            Ok(None) => {
                tracing::debug!(
                    "[ConfigService] no config at {:?}, using defaults",
                    self.file.path()
                );
                Ok(AppConfig::default())
            }
            Err(e) => Err(config_error(self.file.path(), e)),
        }
    }

    /// Writes `config` to the config file.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        self.file
            .save(config)
            .map_err(|e| config_error(self.file.path(), e))
    }
}

fn config_error(path: &Path, err: AtomicFileError) -> RemaindersError {
    RemaindersError::config(format!("{}: {}", path.display(), err))
}
