//! Port contracts for key-value persistence.

pub mod key_value;

pub use key_value::{KeyValueStore, StorageError, StorageResult};

#[cfg(test)]
pub use key_value::MockKeyValueStore;
