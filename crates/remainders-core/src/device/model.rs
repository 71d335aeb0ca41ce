//! DeviceProfile domain model.

use serde::{Deserialize, Serialize};

use crate::error::{RemaindersError, Result};

/// Screen profile of a device selected from the catalog.
///
/// Immutable value object: two profiles are the same device when brand, model
/// and both dimensions match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DeviceFields")]
pub struct DeviceProfile {
    brand: String,
    model: String,
    width: u32,
    height: u32,
}

/// Unchecked wire shape; deserialization goes through [`DeviceProfile::new`].
#[derive(Deserialize)]
struct DeviceFields {
    brand: String,
    model: String,
    width: u32,
    height: u32,
}

impl TryFrom<DeviceFields> for DeviceProfile {
    type Error = RemaindersError;

    fn try_from(fields: DeviceFields) -> Result<Self> {
        Self::new(fields.brand, fields.model, fields.width, fields.height)
    }
}

impl DeviceProfile {
    /// Creates a device profile, rejecting zero dimensions.
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        if width == 0 {
            return Err(RemaindersError::validation("width", "must be a positive integer"));
        }
        if height == 0 {
            return Err(RemaindersError::validation("height", "must be a positive integer"));
        }

        Ok(Self {
            brand: brand.into(),
            model: model.into(),
            width,
            height,
        })
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl std::fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.brand.is_empty() {
            write!(f, "{} ({}x{})", self.model, self.width, self.height)
        } else {
            write!(
                f,
                "{} {} ({}x{})",
                self.brand, self.model, self.width, self.height
            )
        }
    }
}
