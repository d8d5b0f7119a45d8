//! Key-value store abstraction for pluggable persistence backends

use super::StorageError;

/// Durable string key-value storage
///
/// Calls are synchronous and fallible. Implementations must make `set`
/// all-or-nothing for a single key.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Human-readable name for this backend
    fn name(&self) -> &'static str;
}
