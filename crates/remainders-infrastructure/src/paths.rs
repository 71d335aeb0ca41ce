//! Unified path management for remainders files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/remainders/                 # Config directory
//! └── config.toml                       # Application configuration
//!
//! ~/.local/share/remainders/            # Data directory
//! └── remainders-user-profile.json      # Profile record (one per storage key)
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "remainders";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform directory could not be determined.
    DirNotFound(&'static str),
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::DirNotFound(kind) => write!(f, "Cannot find {} directory", kind),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves where configuration and profile data live.
///
/// An explicit base directory replaces the platform directories for both
/// config and data, which keeps tests and portable installs self-contained.
#[derive(Debug, Clone, Default)]
pub struct RemaindersPaths {
    base_dir: Option<PathBuf>,
}

impl RemaindersPaths {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    /// Returns the configuration directory (e.g. `~/.config/remainders/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::DirNotFound("config"))
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the data directory (e.g. `~/.local/share/remainders/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_dir {
            return Ok(base.join("data"));
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::DirNotFound("data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir_override() {
        let paths = RemaindersPaths::new(Some(PathBuf::from("/tmp/remainders-test")));

        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/remainders-test/config.toml")
        );
        assert_eq!(
            paths.data_dir().unwrap(),
            PathBuf::from("/tmp/remainders-test/data")
        );
    }

    #[test]
    fn test_platform_dirs_end_with_app_name() {
        let paths = RemaindersPaths::default();
        if let Ok(config_dir) = paths.config_dir() {
            assert!(config_dir.ends_with("remainders"));
        }
        if let Ok(data_dir) = paths.data_dir() {
            assert!(data_dir.ends_with("remainders"));
        }
    }
}
