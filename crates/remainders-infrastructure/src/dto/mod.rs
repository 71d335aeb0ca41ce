//! Data transfer objects for persisted records.

mod user_profile;

pub use user_profile::{DeviceRecord, UserProfileRecord};
