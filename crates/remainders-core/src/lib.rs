pub mod clipboard;
pub mod config;
pub mod device;
pub mod error;
pub mod profile;
pub mod wallpaper;

// Re-export common error type
pub use error::RemaindersError;
