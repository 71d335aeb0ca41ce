pub mod session;

pub use session::{ProfileSession, ProfileSnapshot};
