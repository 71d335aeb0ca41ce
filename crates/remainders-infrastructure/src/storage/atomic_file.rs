//! Atomic file operations for single-record storage.
//!
//! Provides a thin layer for safe access to one serialized record per file,
//! either TOML (configuration) or JSON (profile record).

use fs2::FileExt;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Errors that can occur during atomic file operations.
#[derive(Debug)]
pub enum AtomicFileError {
    /// File I/O error.
    IoError(std::io::Error),
    /// TOML parse error.
    TomlError(toml::de::Error),
    /// TOML serialization error.
    TomlSerError(toml::ser::Error),
    /// JSON parse or serialization error.
    JsonError(serde_json::Error),
    /// File locking error.
    LockError(String),
}

impl AtomicFileError {
    /// True when the file was read but its content could not be decoded.
    pub fn is_parse_error(&self) -> bool {
        match self {
            AtomicFileError::TomlError(_) => true,
            AtomicFileError::JsonError(e) => !e.is_io(),
            _ => false,
        }
    }
}

impl std::fmt::Display for AtomicFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicFileError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicFileError::TomlError(e) => write!(f, "TOML parse error: {}", e),
            AtomicFileError::TomlSerError(e) => write!(f, "TOML serialization error: {}", e),
            AtomicFileError::JsonError(e) => write!(f, "JSON error: {}", e),
            AtomicFileError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicFileError {}

impl From<std::io::Error> for AtomicFileError {
    fn from(e: std::io::Error) -> Self {
        AtomicFileError::IoError(e)
    }
}

impl From<toml::de::Error> for AtomicFileError {
    fn from(e: toml::de::Error) -> Self {
        AtomicFileError::TomlError(e)
    }
}

impl From<toml::ser::Error> for AtomicFileError {
    fn from(e: toml::ser::Error) -> Self {
        AtomicFileError::TomlSerError(e)
    }
}

impl From<serde_json::Error> for AtomicFileError {
    fn from(e: serde_json::Error) -> Self {
        AtomicFileError::JsonError(e)
    }
}

/// On-disk encoding of an [`AtomicFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    fn encode<T: Serialize>(self, data: &T) -> Result<String, AtomicFileError> {
        Ok(match self {
            FileFormat::Toml => toml::to_string_pretty(data)?,
            FileFormat::Json => serde_json::to_string_pretty(data)?,
        })
    }

    fn decode<T: DeserializeOwned>(self, content: &str) -> Result<T, AtomicFileError> {
        Ok(match self {
            FileFormat::Toml => toml::from_str(content)?,
            FileFormat::Json => serde_json::from_str(content)?,
        })
    }
}

/// A handle to a file holding exactly one serialized record.
///
/// Provides:
/// - **Atomicity**: Writes are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: An exclusive lock file serializes writers
/// - **Durability**: Explicit fsync before rename
pub struct AtomicFile<T> {
    path: PathBuf,
    format: FileFormat,
    _phantom: PhantomData<T>,
}

impl<T> AtomicFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a new atomic file handle.
    pub fn new(path: PathBuf, format: FileFormat) -> Self {
        Self {
            path,
            format,
            _phantom: PhantomData,
        }
    }

    /// Creates a handle for a TOML file.
    pub fn toml(path: PathBuf) -> Self {
        Self::new(path, FileFormat::Toml)
    }

    /// Creates a handle for a JSON file.
    pub fn json(path: PathBuf) -> Self {
        Self::new(path, FileFormat::Json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicFileError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = self.format.decode(&content)?;
        Ok(Some(data))
    }

    /// Replaces the file content with `data`.
    ///
    /// Serialization happens before anything touches the disk, so an
    /// encoding failure leaves the previous record intact. Each write goes
    /// to its own temp file in the target directory and is renamed over the
    /// record while the lock is held, so readers see the old or the new
    /// record, never a mix.
    pub fn save(&self, data: &T) -> Result<(), AtomicFileError> {
        let encoded = self.format.encode(data)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let _lock = FileLock::acquire(&self.path)?;

        let mut tmp_file = tempfile::Builder::new()
            .prefix(&self.temp_prefix()?)
            .suffix(".tmp")
            .tempfile_in(&dir)?;
        tmp_file.write_all(encoded.as_bytes())?;

        // Ensure data is written to disk
        tmp_file.as_file().sync_all()?;

        // Atomic rename; the temp file is removed if this fails
        tmp_file
            .persist(&self.path)
            .map_err(|e| AtomicFileError::IoError(e.error))?;

        Ok(())
    }

    /// Prefix for per-write temp files (`.<name>.XXXXXX.tmp`).
    fn temp_prefix(&self) -> Result<String, AtomicFileError> {
        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        Ok(format!(".{}.", file_name.to_string_lossy()))
    }
}

/// An exclusive lock on `<path>.lock`, released when dropped.
///
/// The lock file is left in place. Unlinking it while locked would let a
/// later writer lock a fresh inode while another still waits on the old one.
struct FileLock {
    file: File,
}

impl FileLock {
    /// Acquires an exclusive lock next to `path`.
    fn acquire(path: &Path) -> Result<Self, AtomicFileError> {
        let lock_path = path.with_extension("lock");

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()
            .map_err(|e| AtomicFileError::LockError(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        count: u32,
    }

    fn record() -> Record {
        Record {
            name: "test".to_string(),
            count: 42,
        }
    }

    #[test]
    fn test_json_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Record>::json(temp_dir.path().join("record.json"));

        file.save(&record()).unwrap();

        assert_eq!(file.load().unwrap(), Some(record()));
    }

    #[test]
    fn test_toml_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Record>::toml(temp_dir.path().join("record.toml"));

        file.save(&record()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("name = \"test\""));
        assert_eq!(file.load().unwrap(), Some(record()));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Record>::json(temp_dir.path().join("missing.json"));

        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.json");
        std::fs::write(&path, "  \n").unwrap();

        let file = AtomicFile::<Record>::json(path);
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_garbage_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("garbage.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = AtomicFile::<Record>::json(path).load().unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("record.json");
        let file = AtomicFile::<Record>::json(path.clone());

        file.save(&record()).unwrap();
        file.save(&record()).unwrap();

        let mut names: Vec<String> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["record.json", "record.lock"]);
    }

    #[test]
    fn test_lock_file_survives_release() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("record.json");

        let lock = FileLock::acquire(&path).unwrap();
        drop(lock);
        assert!(temp_dir.path().join("record.lock").exists());

        // The same lock can be taken again once released.
        let _lock = FileLock::acquire(&path).unwrap();
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("record.json");
        let file = AtomicFile::<Record>::json(path.clone());

        file.save(&record()).unwrap();
        assert!(path.exists());
    }
}
