//! Read-only view of the session for presentation layers.

use serde::Serialize;

use remainders_core::device::DeviceProfile;
use remainders_core::profile::{ProfileState, ViewMode};

/// Everything a front end needs to render the profile screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSnapshot {
    pub birth_date: String,
    pub device: Option<DeviceProfile>,
    pub view_mode: ViewMode,
    /// Whether the generate action is enabled.
    pub can_generate: bool,
    /// The generated URL, only while it matches the current selection.
    pub wallpaper_url: Option<String>,
    /// The "copied" acknowledgment.
    pub copied: bool,
}

impl From<&ProfileState> for ProfileSnapshot {
    fn from(state: &ProfileState) -> Self {
        Self {
            birth_date: state.birth_date().to_string(),
            device: state.device().cloned(),
            view_mode: state.view_mode(),
            can_generate: state.can_generate(),
            wallpaper_url: state.wallpaper_url().map(str::to_string),
            copied: state.copied(),
        }
    }
}
