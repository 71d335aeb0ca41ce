//! Profile session management.

mod profile_session;
mod snapshot;

pub use profile_session::ProfileSession;
pub use snapshot::ProfileSnapshot;
