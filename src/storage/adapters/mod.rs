//! Key-value store implementations.

pub mod configured;
pub mod file;
pub mod memory;

pub use configured::ConfiguredStore;
pub use file::{DEFAULT_FILE_NAME, FileKeyValueStore};
pub use memory::InMemoryKeyValueStore;
