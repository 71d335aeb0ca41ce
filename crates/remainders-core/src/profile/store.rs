//! Profile store trait.

use thiserror::Error;

use super::model::UserProfile;

/// Why a persistence operation did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceFailure {
    /// The backing storage cannot be reached at all.
    Unavailable,
    /// A stored record exists but cannot be turned into a profile.
    Malformed,
    /// Reading or writing the storage medium failed.
    Io,
    /// The profile could not be encoded.
    Serialization,
}

/// Error returned by [`ProfileStore`] operations.
///
/// Never fatal: callers log it and continue as if no profile was stored
/// (load) or as if the save was skipped (save).
#[derive(Debug, Clone, Error)]
#[error("{reason:?}: {message}")]
pub struct PersistenceError {
    pub reason: PersistenceFailure,
    pub message: String,
}

impl PersistenceError {
    pub fn new(reason: PersistenceFailure, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(PersistenceFailure::Unavailable, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(PersistenceFailure::Malformed, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(PersistenceFailure::Io, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(PersistenceFailure::Serialization, message)
    }
}

/// Durable storage for the single profile record of this client.
///
/// Implementations write the whole record as one unit: a `load` after a
/// `save` observes either the previous record or the new one.
pub trait ProfileStore: Send + Sync {
    /// Loads the stored profile.
    ///
    /// A missing record is `Ok(None)`; unreadable or undecodable content is an
    /// error the caller downgrades to "no saved profile".
    fn load(&self) -> Result<Option<UserProfile>, PersistenceError>;

    /// Replaces the stored profile with `profile`.
    fn save(&self, profile: &UserProfile) -> Result<(), PersistenceError>;
}
