//! File-backed profile store.
//!
//! Stores the profile record as JSON in `<data_dir>/<storage_key>.json`.

use std::path::{Path, PathBuf};

use remainders_core::error::{RemaindersError, Result};
use remainders_core::profile::{PersistenceError, ProfileStore, UserProfile};

use crate::dto::UserProfileRecord;
use crate::storage::{AtomicFile, AtomicFileError};

/// Profile store keeping one JSON record per storage key.
///
/// # Example
///
/// ```ignore
/// use remainders_infrastructure::JsonFileProfileStore;
///
/// let store = JsonFileProfileStore::new(data_dir, "remainders-user-profile", "FFFFFF")?;
/// let profile = store.load()?;
/// ```
pub struct JsonFileProfileStore {
    file: AtomicFile<UserProfileRecord>,
    storage_key: String,
    theme_color: String,
}

impl JsonFileProfileStore {
    /// Creates a store for `storage_key` under `data_dir`.
    ///
    /// The key becomes the file name, so it must be non-empty and contain no
    /// path separators.
    pub fn new(
        data_dir: impl AsRef<Path>,
        storage_key: impl Into<String>,
        theme_color: impl Into<String>,
    ) -> Result<Self> {
        let storage_key = storage_key.into();
        validate_storage_key(&storage_key)?;

        let path = data_dir.as_ref().join(format!("{}.json", storage_key));

        Ok(Self {
            file: AtomicFile::json(path),
            storage_key,
            theme_color: theme_color.into(),
        })
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Location of the record on disk.
    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }
}

impl ProfileStore for JsonFileProfileStore {
    fn load(&self) -> std::result::Result<Option<UserProfile>, PersistenceError> {
        let Some(record) = self.file.load().map_err(into_persistence_error)? else {
            tracing::debug!(
                "[JsonFileProfileStore] no record for key '{}'",
                self.storage_key
            );
            return Ok(None);
        };

        record
            .into_profile()
            .map(Some)
            .map_err(|e| PersistenceError::malformed(e.to_string()))
    }

    fn save(&self, profile: &UserProfile) -> std::result::Result<(), PersistenceError> {
        let record = UserProfileRecord::from_profile(profile, &self.theme_color);
        self.file.save(&record).map_err(into_persistence_error)?;

        tracing::debug!(
            "[JsonFileProfileStore] saved record for key '{}' to {:?}",
            self.storage_key,
            self.file.path()
        );
        Ok(())
    }
}

fn validate_storage_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(RemaindersError::validation("storage_key", "must not be empty"));
    }
    if key.contains(['/', '\\']) || key == "." || key == ".." {
        return Err(RemaindersError::validation(
            "storage_key",
            "must not contain path separators",
        ));
    }
    Ok(())
}

fn into_persistence_error(err: AtomicFileError) -> PersistenceError {
    if err.is_parse_error() {
        return PersistenceError::malformed(err.to_string());
    }
    match err {
        AtomicFileError::LockError(_) => PersistenceError::unavailable(err.to_string()),
        AtomicFileError::TomlSerError(_) | AtomicFileError::JsonError(_) => {
            PersistenceError::serialization(err.to_string())
        }
        _ => PersistenceError::io(err.to_string()),
    }
}
