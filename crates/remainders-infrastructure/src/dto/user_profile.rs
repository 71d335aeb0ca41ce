//! Persisted profile record.
//!
//! Wire shape (JSON, camelCase):
//!
//! ```json
//! {
//!   "birthDate": "1990-05-12",
//!   "themeColor": "FFFFFF",
//!   "device": { "brand": "Apple", "modelName": "iPhone 15", "width": 1179, "height": 2556 },
//!   "viewMode": "life"
//! }
//! ```
//!
//! Older records may lack `device.brand`, `viewMode` or `birthDate`; they
//! load with an empty brand, `life` mode and an empty birth date.

use serde::{Deserialize, Serialize};

use remainders_core::device::DeviceProfile;
use remainders_core::error::Result;
use remainders_core::profile::{UserProfile, ViewMode};

/// Device part of the persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    #[serde(default)]
    pub brand: Option<String>,
    pub model_name: String,
    pub width: u32,
    pub height: u32,
}

/// The whole persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileRecord {
    #[serde(default)]
    pub birth_date: String,
    /// Written for readers of the raw record; ignored when loading.
    #[serde(default)]
    pub theme_color: String,
    #[serde(default)]
    pub device: Option<DeviceRecord>,
    #[serde(default)]
    pub view_mode: Option<ViewMode>,
}

impl UserProfileRecord {
    /// Builds the record written for `profile`.
    pub fn from_profile(profile: &UserProfile, theme_color: &str) -> Self {
        Self {
            birth_date: profile.birth_date.clone(),
            theme_color: theme_color.to_string(),
            device: profile.device.as_ref().map(DeviceRecord::from),
            view_mode: Some(profile.view_mode),
        }
    }

    /// Converts the record into the domain model.
    ///
    /// Fails when the stored device has a zero dimension.
    pub fn into_profile(self) -> Result<UserProfile> {
        let device = self.device.map(DeviceRecord::into_device).transpose()?;

        Ok(UserProfile {
            birth_date: self.birth_date,
            device,
            view_mode: self.view_mode.unwrap_or_default(),
        })
    }
}

impl DeviceRecord {
    fn into_device(self) -> Result<DeviceProfile> {
        DeviceProfile::new(
            self.brand.unwrap_or_default(),
            self.model_name,
            self.width,
            self.height,
        )
    }
}

impl From<&DeviceProfile> for DeviceRecord {
    fn from(device: &DeviceProfile) -> Self {
        Self {
            brand: Some(device.brand().to_string()),
            model_name: device.model().to_string(),
            width: device.width(),
            height: device.height(),
        }
    }
}
