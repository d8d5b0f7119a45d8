//! Dispatch coordination and queue ordering
//!
//! This module handles:
//! - Assigning drones to pending requests without double assignment
//! - Completing requests and returning drones to service
//! - Ordering the request queue for display

mod coordinator;
pub mod priority;

pub use coordinator::{DashboardStats, DispatchCoordinator, DispatchResult};
