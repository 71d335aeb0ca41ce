//! Wallpaper URL derivation.

use url::{Origin, Url, form_urlencoded};

use crate::device::DeviceProfile;
use crate::error::{RemaindersError, Result};
use crate::profile::{UserProfile, ViewMode};

/// Path of the rendering endpoint, relative to the origin.
pub const WALLPAPER_ENDPOINT: &str = "/api/wallpaper";

/// Theme colour sent when none is configured (white on dark).
pub const DEFAULT_THEME_COLOR: &str = "FFFFFF";

/// Maps a selection to the URL of the remote wallpaper renderer.
///
/// Pure and deterministic: the same inputs always produce the same string
/// and nothing is fetched. The theme colour and origin are fixed at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    theme_color: String,
    base_origin: String,
}

impl UrlBuilder {
    /// Creates a builder producing relative URLs (`/api/wallpaper?...`).
    pub fn relative(theme_color: impl Into<String>) -> Self {
        Self {
            theme_color: theme_color.into(),
            base_origin: String::new(),
        }
    }

    /// Creates a builder rooted at the origin (scheme + host + port) of `location`.
    ///
    /// Any path, query or fragment in `location` is dropped.
    pub fn with_origin(theme_color: impl Into<String>, location: &str) -> Result<Self> {
        let parsed = Url::parse(location)?;
        let base_origin = match parsed.origin() {
            origin @ Origin::Tuple(..) => origin.ascii_serialization(),
            Origin::Opaque(_) => {
                return Err(RemaindersError::config(format!(
                    "'{}' has no network origin",
                    location
                )));
            }
        };

        Ok(Self {
            theme_color: theme_color.into(),
            base_origin,
        })
    }

    /// Creates a builder from optional configuration values.
    pub fn from_config(theme_color: impl Into<String>, base_origin: Option<&str>) -> Result<Self> {
        match base_origin {
            Some(location) if !location.trim().is_empty() => {
                Self::with_origin(theme_color, location.trim())
            }
            _ => Ok(Self::relative(theme_color)),
        }
    }

    pub fn theme_color(&self) -> &str {
        &self.theme_color
    }

    /// The origin prefix, empty for relative URLs.
    pub fn base_origin(&self) -> &str {
        &self.base_origin
    }

    /// Builds the wallpaper URL.
    ///
    /// Missing inputs leave out their parameters instead of failing; the
    /// endpoint decides what it accepts. `birth_date` is only sent in
    /// `Life` mode, verbatim.
    pub fn build(
        &self,
        view_mode: ViewMode,
        device: Option<&DeviceProfile>,
        birth_date: &str,
    ) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("themeColor", &self.theme_color);

        if let Some(device) = device {
            query.append_pair("width", &device.width().to_string());
            query.append_pair("height", &device.height().to_string());
        }

        query.append_pair("viewMode", &view_mode.to_string());

        if view_mode.requires_birth_date() && !birth_date.is_empty() {
            query.append_pair("birthDate", birth_date);
        }

        format!("{}{}?{}", self.base_origin, WALLPAPER_ENDPOINT, query.finish())
    }

    /// Builds the URL for a whole profile.
    pub fn build_for(&self, profile: &UserProfile) -> String {
        self.build(
            profile.view_mode,
            profile.device.as_ref(),
            &profile.birth_date,
        )
    }
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self::relative(DEFAULT_THEME_COLOR)
    }
}
