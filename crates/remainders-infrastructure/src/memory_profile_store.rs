//! In-memory profile store.

use std::sync::{Arc, Mutex};

use remainders_core::profile::{PersistenceError, ProfileStore, UserProfile};

/// Keeps the profile in process memory.
///
/// Used for `--ephemeral` runs and as a test double. Clones share the same
/// record, so a test can keep a handle and inspect what the session saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    record: Option<UserProfile>,
    save_count: usize,
    fail_saves: bool,
    fail_loads: bool,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `profile`.
    pub fn with_profile(profile: UserProfile) -> Self {
        let store = Self::new();
        store.lock().record = Some(profile);
        store
    }

    /// Makes subsequent saves fail with `Unavailable`.
    pub fn fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    /// Makes subsequent loads fail with `Malformed`.
    pub fn fail_loads(&self, fail: bool) {
        self.lock().fail_loads = fail;
    }

    /// The currently stored profile.
    pub fn snapshot(&self) -> Option<UserProfile> {
        self.lock().record.clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        // A poisoned lock only means a test panicked mid-call; the data is still usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self) -> Result<Option<UserProfile>, PersistenceError> {
        let inner = self.lock();
        if inner.fail_loads {
            return Err(PersistenceError::malformed("memory store configured to fail loads"));
        }
        Ok(inner.record.clone())
    }

    fn save(&self, profile: &UserProfile) -> Result<(), PersistenceError> {
        let mut inner = self.lock();
        if inner.fail_saves {
            return Err(PersistenceError::unavailable(
                "memory store configured to fail saves",
            ));
        }
        inner.record = Some(profile.clone());
        inner.save_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remainders_core::profile::{PersistenceFailure, ViewMode};

    #[test]
    fn test_empty_store_loads_none() {
        let store = MemoryProfileStore::new();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_overwrites() {
        let store = MemoryProfileStore::new();
        store
            .save(&UserProfile::new("1990-05-12", None, ViewMode::Life))
            .unwrap();
        store
            .save(&UserProfile::new("", None, ViewMode::Year))
            .unwrap();

        assert_eq!(store.snapshot().unwrap().view_mode, ViewMode::Year);
        assert_eq!(store.save_count(), 2);
    }

    #[test]
    fn test_failing_saves_keep_previous_record() {
        let store = MemoryProfileStore::with_profile(UserProfile::default());
        store.fail_saves(true);

        let err = store
            .save(&UserProfile::new("2000-01-01", None, ViewMode::Life))
            .unwrap_err();

        assert_eq!(err.reason, PersistenceFailure::Unavailable);
        assert_eq!(store.snapshot(), Some(UserProfile::default()));
        assert_eq!(store.save_count(), 0);
    }
}
