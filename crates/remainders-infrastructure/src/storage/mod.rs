//! Storage layer for atomic single-record files.

mod atomic_file;

pub use atomic_file::{AtomicFile, AtomicFileError, FileFormat};
