//! Registries owning the request and drone collections
//!
//! This module handles:
//! - Loading seeded and persisted records
//! - Validating and storing new requests
//! - Status changes, written to storage before they are applied in memory

mod fleet;
mod requests;

pub use fleet::FleetRegistry;
pub use requests::{RequestInput, RequestRegistry};
