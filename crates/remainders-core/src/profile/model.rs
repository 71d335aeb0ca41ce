//! UserProfile domain model.
//!
//! The profile is the triple of birth date, device and view mode that the
//! wallpaper URL is derived from.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::device::DeviceProfile;

/// Whether the wallpaper counts down the current year or a lifespan.
///
/// Only `Life` needs a birth date.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ViewMode {
    Year,
    #[default]
    Life,
}

impl ViewMode {
    /// Returns true if this mode cannot render without a birth date.
    pub fn requires_birth_date(self) -> bool {
        matches!(self, ViewMode::Life)
    }
}

/// User profile domain model.
///
/// `birth_date` is an ISO-8601 calendar date (`YYYY-MM-DD`) or empty. It is
/// kept as the literal string the user entered because that exact text is
/// forwarded to the rendering endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub birth_date: String,
    pub device: Option<DeviceProfile>,
    pub view_mode: ViewMode,
}

impl UserProfile {
    pub fn new(
        birth_date: impl Into<String>,
        device: Option<DeviceProfile>,
        view_mode: ViewMode,
    ) -> Self {
        Self {
            birth_date: birth_date.into(),
            device,
            view_mode,
        }
    }

    /// Completeness predicate.
    ///
    /// A device is always required; a birth date only in `Life` mode.
    pub fn is_complete(&self) -> bool {
        match self.view_mode {
            ViewMode::Year => self.device.is_some(),
            ViewMode::Life => self.device.is_some() && !self.birth_date.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn iphone() -> DeviceProfile {
        DeviceProfile::new("Apple", "iPhone 15", 1179, 2556).unwrap()
    }

    #[test]
    fn test_view_mode_strings() {
        assert_eq!(ViewMode::Year.to_string(), "year");
        assert_eq!(ViewMode::Life.to_string(), "life");
        assert_eq!(ViewMode::from_str("year").unwrap(), ViewMode::Year);
        assert_eq!(ViewMode::from_str("life").unwrap(), ViewMode::Life);
        assert!(ViewMode::from_str("decade").is_err());
    }

    #[test]
    fn test_view_mode_default_is_life() {
        assert_eq!(ViewMode::default(), ViewMode::Life);
    }

    #[test]
    fn test_view_mode_serde() {
        let json = serde_json::to_string(&ViewMode::Year).unwrap();
        assert_eq!(json, "\"year\"");
        let mode: ViewMode = serde_json::from_str("\"life\"").unwrap();
        assert_eq!(mode, ViewMode::Life);
    }

    #[test]
    fn test_life_requires_device_and_birth_date() {
        let profile = UserProfile::new("1990-05-12", Some(iphone()), ViewMode::Life);
        assert!(profile.is_complete());

        let no_date = UserProfile::new("", Some(iphone()), ViewMode::Life);
        assert!(!no_date.is_complete());

        let no_device = UserProfile::new("2000-01-01", None, ViewMode::Life);
        assert!(!no_device.is_complete());
    }

    #[test]
    fn test_year_ignores_birth_date() {
        let profile = UserProfile::new("", Some(iphone()), ViewMode::Year);
        assert!(profile.is_complete());

        let no_device = UserProfile::new("1990-05-12", None, ViewMode::Year);
        assert!(!no_device.is_complete());
    }

    #[test]
    fn test_default_profile_is_empty() {
        let profile = UserProfile::default();
        assert!(profile.birth_date.is_empty());
        assert!(profile.device.is_none());
        assert_eq!(profile.view_mode, ViewMode::Life);
        assert!(!profile.is_complete());
    }
}
