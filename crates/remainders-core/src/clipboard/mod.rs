//! Clipboard bridge trait.
//!
//! Copying is best effort. A failed write is logged by the caller and the
//! only visible consequence is that no "copied" acknowledgment appears.

use async_trait::async_trait;
use thiserror::Error;

/// Reasons a clipboard write can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// There was nothing to copy.
    #[error("nothing to copy")]
    EmptyText,

    /// No clipboard is available on this platform.
    #[error("clipboard unsupported: {0}")]
    Unsupported(String),

    /// The platform refused the write.
    #[error("clipboard access denied: {0}")]
    Denied(String),

    /// The write was attempted and failed.
    #[error("clipboard write failed: {0}")]
    Failed(String),
}

/// Writes text to the platform clipboard.
#[async_trait]
pub trait ClipboardBridge: Send + Sync {
    /// Suspends until the clipboard accepted or rejected `text`.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}
