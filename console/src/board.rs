//! Responder dashboard: queue, fleet and the dispatch action

use aeroreach_dispatch::{
    Clock, DashboardStats, DispatchCoordinator, DispatchError, DispatchResult, NotificationSurface,
};
use aeroreach_shared::{BatteryLevel, Drone, DroneStatus, MedicalRequest, RequestStatus};
use std::sync::Arc;
use tracing::debug;

const MINUTE_MS: u64 = 60_000;

/// Relative age of a timestamp: "Just now", "12 min ago", "3h ago"
pub fn format_elapsed(now_ms: u64, then_ms: u64) -> String {
    let minutes = now_ms.saturating_sub(then_ms) / MINUTE_MS;
    match minutes {
        0 => "Just now".to_string(),
        1..=59 => format!("{} min ago", minutes),
        _ => format!("{}h ago", minutes / 60),
    }
}

/// Badge on a request card; emergencies always show as such
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Emergency,
    Status(RequestStatus),
}

impl Badge {
    pub fn for_request(request: &MedicalRequest) -> Self {
        if request.is_emergency {
            Badge::Emergency
        } else {
            Badge::Status(request.status)
        }
    }

    pub fn label(&self) -> String {
        match self {
            Badge::Emergency => "EMERGENCY".to_string(),
            Badge::Status(status) => status.as_str().to_ascii_uppercase(),
        }
    }
}

/// One request card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRow {
    pub id: String,
    pub location: String,
    pub elapsed: String,
    pub badge: Badge,
    pub status: RequestStatus,
    /// "Name, age"
    pub patient: String,
    pub category: &'static str,
    pub injury: String,
    /// Shows the drone picker and dispatch button
    pub dispatchable: bool,
}

impl RequestRow {
    fn new(request: &MedicalRequest, now_ms: u64) -> Self {
        Self {
            id: request.id.clone(),
            location: request.location.clone(),
            elapsed: format_elapsed(now_ms, request.timestamp),
            badge: Badge::for_request(request),
            status: request.status,
            patient: format!("{}, {}", request.name, request.age),
            category: request.injury_category.label(),
            injury: request.injury_label().to_string(),
            dispatchable: request.status == RequestStatus::Pending,
        }
    }
}

/// One fleet card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroneRow {
    pub id: String,
    pub name: String,
    pub status: DroneStatus,
    pub battery: u8,
    pub battery_level: BatteryLevel,
}

impl From<&Drone> for DroneRow {
    fn from(drone: &Drone) -> Self {
        Self {
            id: drone.id.clone(),
            name: drone.name.clone(),
            status: drone.status,
            battery: drone.battery,
            battery_level: drone.battery_level(),
        }
    }
}

/// Everything the dashboard shows at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub stats: DashboardStats,
    /// In priority order
    pub requests: Vec<RequestRow>,
    pub drones: Vec<DroneRow>,
    /// (id, name) of drones offered in the picker
    pub drone_choices: Vec<(String, String)>,
}

impl BoardView {
    /// Plain-text lines of the dashboard
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Pending: {}  Active: {}  Drones available: {}",
            self.stats.pending, self.stats.active, self.stats.available_drones
        )];

        for row in &self.requests {
            lines.push(format!(
                "[{}] {} | {} | {} | {} ({})",
                row.badge.label(),
                row.location,
                row.elapsed,
                row.patient,
                row.category,
                row.injury
            ));
        }

        for drone in &self.drones {
            lines.push(format!("{} {} {}%", drone.name, drone.status, drone.battery));
        }

        lines
    }
}

/// Dashboard actions on top of the coordinator
pub struct ResponderBoard {
    coordinator: Arc<DispatchCoordinator>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn NotificationSurface>,
}

impl ResponderBoard {
    pub fn new(
        coordinator: Arc<DispatchCoordinator>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn NotificationSurface>,
    ) -> Self {
        Self {
            coordinator,
            clock,
            notifier,
        }
    }

    pub async fn snapshot(&self) -> BoardView {
        let now = self.clock.now_ms();
        let stats = self.coordinator.stats().await;
        let queue = self.coordinator.queue().await;
        let drones = self.coordinator.drones().await;

        BoardView {
            stats,
            requests: queue.iter().map(|r| RequestRow::new(r, now)).collect(),
            drone_choices: drones
                .iter()
                .filter(|d| d.is_available())
                .map(|d| (d.id.clone(), d.name.clone()))
                .collect(),
            drones: drones.iter().map(DroneRow::from).collect(),
        }
    }

    /// Re-read everything and tell the user
    pub async fn refresh(&self) -> BoardView {
        self.notifier.notify("Refreshed", "Data updated");
        self.snapshot().await
    }

    /// Dispatch the drone picked for a request card
    ///
    /// The coordinator reports the outcome; only a missing pick is reported
    /// here.
    pub async fn dispatch(
        &self,
        request_id: &str,
        selected_drone: Option<&str>,
    ) -> Result<DispatchResult, DispatchError> {
        let drone_id = match selected_drone.map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => {
                debug!("Dispatch for {} attempted without a drone", request_id);
                self.notifier.notify("Error", "Please select a drone");
                return Err(DispatchError::Validation {
                    fields: vec!["droneId".to_string()],
                });
            }
        };

        self.coordinator.dispatch(request_id, drone_id).await
    }
}
