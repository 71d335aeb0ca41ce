//! Profile domain module.
//!
//! # Module Structure
//!
//! - `model`: `UserProfile` and `ViewMode`
//! - `state`: the in-session state machine (`ProfileState`)
//! - `store`: persistence trait and its error type
//!
//! # Usage
//!
//! ```ignore
//! use remainders_core::profile::{ProfileEvent, ProfileState, UserProfile, ViewMode};
//! ```

mod model;
mod state;
mod store;

pub use model::{UserProfile, ViewMode};
pub use state::{
    DerivedUrl, Effects, FeedbackTicket, GenerationTrigger, ProfileEvent, ProfileState,
};
pub use store::{PersistenceError, PersistenceFailure, ProfileStore};
