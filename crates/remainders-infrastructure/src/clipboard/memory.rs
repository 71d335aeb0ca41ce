//! In-memory clipboard.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use remainders_core::clipboard::{ClipboardBridge, ClipboardError};

/// Clipboard that records writes instead of touching the platform.
///
/// Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    inner: Arc<Mutex<MemoryClipboardInner>>,
}

#[derive(Debug, Default)]
struct MemoryClipboardInner {
    writes: Vec<String>,
    deny: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent writes fail with `Denied`.
    pub fn deny_writes(&self, deny: bool) {
        self.lock().deny = deny;
    }

    /// Most recently copied text.
    pub fn contents(&self) -> Option<String> {
        self.lock().writes.last().cloned()
    }

    /// Every successful write, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.lock().writes.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryClipboardInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ClipboardBridge for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if text.is_empty() {
            return Err(ClipboardError::EmptyText);
        }

        let mut inner = self.lock();
        if inner.deny {
            return Err(ClipboardError::Denied("writes denied".to_string()));
        }
        inner.writes.push(text.to_string());
        Ok(())
    }
}
