//! Application configuration model.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::wallpaper::DEFAULT_THEME_COLOR;

/// Key the profile record is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "remainders-user-profile";

/// How long the "copied" acknowledgment stays visible.
pub const DEFAULT_COPY_FEEDBACK_MS: u64 = 2000;

/// Process-wide settings injected at startup.
///
/// Every field is optional in the file; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Storage key of the single profile record.
    pub storage_key: String,
    /// Hex colour forwarded as `themeColor`.
    pub theme_color: String,
    /// Origin the wallpaper URL is rooted at; relative URLs when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_origin: Option<String>,
    pub copy_feedback_ms: u64,
    /// Overrides the platform data directory for the profile store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            theme_color: DEFAULT_THEME_COLOR.to_string(),
            base_origin: None,
            copy_feedback_ms: DEFAULT_COPY_FEEDBACK_MS,
            data_dir: None,
        }
    }
}

impl AppConfig {
    pub fn copy_feedback_delay(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}
