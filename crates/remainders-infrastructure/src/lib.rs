pub mod clipboard;
pub mod config_service;
pub mod dto;
pub mod json_profile_store;
pub mod memory_profile_store;
pub mod paths;
pub mod storage;

pub use crate::clipboard::{MemoryClipboard, SystemClipboard};
pub use crate::config_service::ConfigService;
pub use crate::json_profile_store::JsonFileProfileStore;
pub use crate::memory_profile_store::MemoryProfileStore;
