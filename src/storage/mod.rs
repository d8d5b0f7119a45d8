//! Durable storage for requests, fleet state and the emergency hand-off
//!
//! This module handles:
//! - The key-value store abstraction and its backends
//! - Reading and writing typed JSON documents under the well-known keys

mod directory;
mod memory;
mod traits;

pub use directory::DirectoryStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;

use aeroreach_shared::codec::{self, CodecError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Submitted requests, seeded ones included once they change
pub const REQUESTS_KEY: &str = "requests";

/// Fleet status and battery
pub const DRONES_KEY: &str = "drones";

/// Hand-off record read once by the guidance surface
pub const CURRENT_EMERGENCY_KEY: &str = "currentEmergency";

/// Errors raised by a storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Read and decode a document, treating a missing key as the default value
pub fn load_document<T>(store: &dyn KeyValueStore, key: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    let raw = store.get(key)?;
    Ok(codec::decode_or_default(raw.as_deref())?)
}

/// Encode and write a document
pub fn save_document<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
{
    let text = codec::encode(value)?;
    store.set(key, &text)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Store wrapper with switchable write failures

    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    pub struct FlakyStore {
        inner: Arc<MemoryStore>,
        /// Remaining successful writes per key; absent means unlimited
        budgets: Arc<Mutex<HashMap<String, usize>>>,
    }

    impl FlakyStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every write to `key` fail until `heal` is called
        pub fn fail_writes(&self, key: &str) {
            self.fail_writes_after(key, 0);
        }

        /// Allow `allowed` more writes to `key`, then fail
        pub fn fail_writes_after(&self, key: &str, allowed: usize) {
            self.budgets.lock().unwrap().insert(key.to_string(), allowed);
        }

        pub fn heal(&self, key: &str) {
            self.budgets.lock().unwrap().remove(key);
        }

        fn check(&self, key: &str) -> Result<(), StorageError> {
            let mut budgets = self.budgets.lock().unwrap();
            match budgets.get_mut(key) {
                Some(0) => Err(StorageError::Unavailable(format!("write to {} refused", key))),
                Some(remaining) => {
                    *remaining -= 1;
                    Ok(())
                }
                None => Ok(()),
            }
        }
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.check(key)?;
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.check(key)?;
            self.inner.remove(key)
        }

        fn name(&self) -> &'static str {
            "flaky"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeroreach_shared::{Drone, DroneStatus};

    #[test]
    fn test_document_roundtrip_through_store() {
        let store = MemoryStore::new();
        let fleet = vec![Drone::new("drone-2", "AeroMed-02", DroneStatus::Available, 92)];

        save_document(&store, DRONES_KEY, &fleet).expect("save failed");
        let loaded: Vec<Drone> = load_document(&store, DRONES_KEY).expect("load failed");
        assert_eq!(loaded, fleet);
    }

    #[test]
    fn test_missing_document_is_default() {
        let store = MemoryStore::new();
        let loaded: Vec<Drone> = load_document(&store, DRONES_KEY).expect("load failed");
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_corrupt_document_is_reported() {
        let store = MemoryStore::new();
        store.set(DRONES_KEY, "[{").expect("set failed");

        let result = load_document::<Vec<Drone>>(&store, DRONES_KEY);
        assert!(matches!(result, Err(StorageError::Codec(_))));
    }
}
