//! Runtime configuration
//!
//! Resolved once at startup and passed into [`crate::bootstrap`]; nothing in
//! the core reads the environment while handling a request.

use crate::storage::{DirectoryStore, KeyValueStore, MemoryStore, StorageError};
use std::path::PathBuf;
use std::sync::Arc;

/// Data directory; when unset the process-local memory store is used
pub const ENV_DATA_DIR: &str = "AEROREACH_DATA_DIR";

/// Whether to load the example requests
pub const ENV_SEED_DEMO: &str = "AEROREACH_SEED_DEMO";

/// Prefix for generated request ids
pub const ENV_ID_PREFIX: &str = "AEROREACH_ID_PREFIX";

/// Where durable state lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Kept in memory, gone on exit
    Memory,
    /// One JSON file per key under this directory
    Directory(PathBuf),
}

/// Configuration for the dispatch core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    pub storage: StorageBackend,
    /// Load the example requests alongside persisted ones
    pub seed_demo_requests: bool,
    pub id_prefix: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::Memory,
            seed_demo_requests: true,
            id_prefix: "req".into(),
        }
    }
}

impl DispatchConfig {
    /// Build from process environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unset or blank values keep defaults
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get(ENV_DATA_DIR) {
            config.storage = StorageBackend::Directory(PathBuf::from(dir));
        }
        if let Some(flag) = get(ENV_SEED_DEMO) {
            config.seed_demo_requests = !matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }
        if let Some(prefix) = get(ENV_ID_PREFIX) {
            config.id_prefix = prefix.trim().to_string();
        }

        config
    }

    /// Open the configured store
    pub fn open_store(&self) -> Result<Arc<dyn KeyValueStore>, StorageError> {
        match &self.storage {
            StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
            StorageBackend::Directory(dir) => Ok(Arc::new(DirectoryStore::open(dir)?)),
        }
    }
}
