//! Error types for the Remainders application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Remainders application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum RemaindersError {
    /// A value failed domain validation (zero dimensions, unknown view mode, ...)
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The current selection cannot produce a wallpaper URL
    #[error("Profile is incomplete: {0}")]
    Incomplete(String),
}

impl RemaindersError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RemaindersError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RemaindersError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RemaindersError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for RemaindersError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for RemaindersError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("invalid origin: {}", err))
    }
}

/// A type alias for `Result<T, RemaindersError>`.
pub type Result<T> = std::result::Result<T, RemaindersError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_helper() {
        let err = RemaindersError::validation("width", "must be positive");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: width - must be positive");
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: RemaindersError = io.into();
        assert!(err.to_string().contains("PermissionDenied"));
    }

    #[test]
    fn test_incomplete_and_origin_errors_display() {
        let err = RemaindersError::Incomplete("select a device".to_string());
        assert_eq!(err.to_string(), "Profile is incomplete: select a device");

        let err: RemaindersError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, RemaindersError::Config(_)));
    }
}
