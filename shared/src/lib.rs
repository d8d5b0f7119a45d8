//! AeroReach Shared Record Types
//!
//! This crate provides the record types, injury taxonomy, request lifecycle
//! and storage codec shared by the dispatch core and the console adapter.

pub mod codec;
pub mod guidance;
pub mod state_machine;
pub mod taxonomy;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

// Re-export commonly used types at crate root
pub use taxonomy::{InjuryCategory, InjuryType};

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Fleet and guidance thresholds
pub mod limits {
    /// Battery below this percentage is shown as critical
    pub const BATTERY_CRITICAL_PERCENT: u8 = 30;

    /// Battery below this percentage is shown as low
    pub const BATTERY_LOW_PERCENT: u8 = 60;

    /// Upper bound of a battery reading
    pub const BATTERY_MAX_PERCENT: u8 = 100;

    /// Simulated ETA when an emergency briefing opens
    pub const INITIAL_ETA_MINUTES: u32 = 8;

    /// The countdown never shows less than this
    pub const MIN_ETA_MINUTES: u32 = 1;

    /// One countdown step
    pub const ETA_TICK_MS: u64 = 60_000;
}

/// Lifecycle status of a medical request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Dispatched,
    Completed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Dispatched => "dispatched",
            RequestStatus::Completed => "completed",
        }
    }

    /// Whether a request in this status must reference a drone
    pub fn requires_drone(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational status of a drone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DroneStatus {
    Available,
    InFlight,
    Charging,
    Maintenance,
}

impl DroneStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DroneStatus::Available => "available",
            DroneStatus::InFlight => "in-flight",
            DroneStatus::Charging => "charging",
            DroneStatus::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for DroneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display classification of a battery reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryLevel {
    Critical,
    Low,
    Normal,
}

/// A submitted injury report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRequest {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub location: String,
    pub injury_category: InjuryCategory,
    pub injury_type: String,
    #[serde(default)]
    pub description: String,
    pub status: RequestStatus,
    pub is_emergency: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drone_id: Option<String>,
    /// Creation instant in milliseconds since Unix epoch
    #[serde(deserialize_with = "codec::deserialize_timestamp")]
    pub timestamp: u64,
}

impl MedicalRequest {
    /// Not yet completed
    pub fn is_active(&self) -> bool {
        self.status != RequestStatus::Completed
    }

    /// Whether this request currently holds the given drone
    pub fn holds_drone(&self, drone_id: &str) -> bool {
        self.is_active() && self.drone_id.as_deref() == Some(drone_id)
    }

    /// Drone reference present iff the status requires one
    pub fn is_consistent(&self) -> bool {
        self.status.requires_drone() == self.drone_id.is_some()
    }

    /// Human readable label of the injury type, falling back to its key
    pub fn injury_label(&self) -> &str {
        self.injury_category
            .find_type(&self.injury_type)
            .map(|t| t.label)
            .unwrap_or(&self.injury_type)
    }
}

/// A fleet drone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drone {
    pub id: String,
    pub name: String,
    pub status: DroneStatus,
    /// Battery percentage, 0-100
    pub battery: u8,
}

impl Drone {
    /// Create a drone; battery readings above 100 are clamped
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        status: DroneStatus,
        battery: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status,
            battery: battery.min(limits::BATTERY_MAX_PERCENT),
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == DroneStatus::Available
    }

    pub fn battery_level(&self) -> BatteryLevel {
        if self.battery < limits::BATTERY_CRITICAL_PERCENT {
            BatteryLevel::Critical
        } else if self.battery < limits::BATTERY_LOW_PERCENT {
            BatteryLevel::Low
        } else {
            BatteryLevel::Normal
        }
    }
}

/// Transient record handed from a critical submission to the guidance surface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmergencyNotice {
    pub injury_type: String,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request(status: RequestStatus, drone_id: Option<&str>) -> MedicalRequest {
        MedicalRequest {
            id: "req-1".into(),
            name: "John Smith".into(),
            age: 45,
            location: "123 Main Street".into(),
            injury_category: InjuryCategory::Trauma,
            injury_type: "heavy_bleeding".into(),
            description: String::new(),
            status,
            is_emergency: true,
            drone_id: drone_id.map(String::from),
            timestamp: 1_000,
        }
    }

    #[test]
    fn test_now_ms_is_set() {
        assert!(now_ms() > 0);
    }

    #[test]
    fn test_request_consistency() {
        assert!(sample_request(RequestStatus::Pending, None).is_consistent());
        assert!(!sample_request(RequestStatus::Pending, Some("drone-1")).is_consistent());
        assert!(sample_request(RequestStatus::Dispatched, Some("drone-1")).is_consistent());
        assert!(!sample_request(RequestStatus::Completed, None).is_consistent());
    }

    #[test]
    fn test_holds_drone_only_while_active() {
        let dispatched = sample_request(RequestStatus::Dispatched, Some("drone-1"));
        assert!(dispatched.holds_drone("drone-1"));
        assert!(!dispatched.holds_drone("drone-2"));

        let completed = sample_request(RequestStatus::Completed, Some("drone-1"));
        assert!(!completed.holds_drone("drone-1"));
    }

    #[test]
    fn test_injury_label_falls_back_to_key() {
        let mut req = sample_request(RequestStatus::Pending, None);
        assert_eq!(req.injury_label(), "Heavy Bleeding");

        req.injury_type = "unlisted".into();
        assert_eq!(req.injury_label(), "unlisted");
    }

    #[test]
    fn test_battery_levels() {
        let level = |battery| Drone::new("d", "D", DroneStatus::Available, battery).battery_level();
        assert_eq!(level(29), BatteryLevel::Critical);
        assert_eq!(level(30), BatteryLevel::Low);
        assert_eq!(level(59), BatteryLevel::Low);
        assert_eq!(level(60), BatteryLevel::Normal);
    }

    #[test]
    fn test_battery_clamped() {
        let drone = Drone::new("d", "D", DroneStatus::Charging, 250);
        assert_eq!(drone.battery, 100);
    }

    #[test]
    fn test_status_display_matches_wire_names() {
        assert_eq!(DroneStatus::InFlight.to_string(), "in-flight");
        assert_eq!(RequestStatus::Dispatched.to_string(), "dispatched");
    }
}
