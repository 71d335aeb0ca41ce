//! Device domain module.
//!
//! A device is the screen the wallpaper is rendered for. Only its pixel
//! dimensions affect the generated URL; brand and model are carried along for
//! display and for the persisted record.

mod model;

pub use model::DeviceProfile;
