//! Clipboard bridge implementations.

mod memory;
mod system;

pub use memory::MemoryClipboard;
pub use system::{ClipboardCommand, SystemClipboard};
