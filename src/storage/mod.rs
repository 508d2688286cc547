//! Key-value persistence for workspace collections.
//!
//! The workspace stores each collection as one JSON-encoded array under a
//! fixed key. [`ports::KeyValueStore`] is the contract; [`adapters`] holds the
//! in-memory and file-backed implementations.

pub mod adapters;
pub mod ports;
