//! Dispatch coordinator: assigns drones to requests across both registries

use crate::error::DispatchError;
use crate::notify::{NotificationSurface, SilentNotifier};
use crate::registry::{FleetRegistry, RequestInput, RequestRegistry};
use aeroreach_shared::{Drone, DroneStatus, MedicalRequest, RequestStatus};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::priority;

/// Outcome of a successful dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    pub request: MedicalRequest,
    pub drone: Drone,
}

/// Counters shown at the top of the responder dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub pending: usize,
    pub active: usize,
    pub available_drones: usize,
}

/// Coordinates operations that touch a request and a drone together
///
/// Both registries sit behind write locks that are always taken in the order
/// requests -> fleet, so a dispatch's check-then-act sequence runs alone.
pub struct DispatchCoordinator {
    requests: Arc<RwLock<RequestRegistry>>,
    fleet: Arc<RwLock<FleetRegistry>>,
    notifier: Arc<dyn NotificationSurface>,
}

impl DispatchCoordinator {
    /// Create a coordinator owning both registries
    pub fn new(requests: RequestRegistry, fleet: FleetRegistry) -> Self {
        Self {
            requests: Arc::new(RwLock::new(requests)),
            fleet: Arc::new(RwLock::new(fleet)),
            notifier: Arc::new(SilentNotifier),
        }
    }

    /// Report dispatch outcomes to `notifier`
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSurface>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Shared handle to the request registry
    pub fn requests(&self) -> Arc<RwLock<RequestRegistry>> {
        self.requests.clone()
    }

    /// Shared handle to the fleet registry
    pub fn fleet(&self) -> Arc<RwLock<FleetRegistry>> {
        self.fleet.clone()
    }

    /// Submit a new request
    pub async fn submit(&self, input: RequestInput) -> Result<MedicalRequest, DispatchError> {
        self.requests.write().await.submit(input)
    }

    /// Assign an available drone to a pending request
    pub async fn dispatch(
        &self,
        request_id: &str,
        drone_id: &str,
    ) -> Result<DispatchResult, DispatchError> {
        let result = self.dispatch_locked(request_id, drone_id).await;

        match &result {
            Ok(outcome) => {
                info!(
                    "Dispatched {} to request {} ({})",
                    outcome.drone.id, outcome.request.id, outcome.request.location
                );
                self.notifier.notify(
                    "Drone Dispatched",
                    &format!("{} is on the way!", outcome.drone.name),
                );
            }
            Err(e) => {
                warn!("Dispatch of {} to {} refused: {}", drone_id, request_id, e);
                self.notifier.notify("Dispatch Failed", &e.user_message());
            }
        }

        result
    }

    async fn dispatch_locked(
        &self,
        request_id: &str,
        drone_id: &str,
    ) -> Result<DispatchResult, DispatchError> {
        let mut requests = self.requests.write().await;
        let mut fleet = self.fleet.write().await;

        let previous = requests
            .get(request_id)
            .cloned()
            .ok_or_else(|| DispatchError::request_not_found(request_id))?;

        if previous.status != RequestStatus::Pending {
            return Err(DispatchError::InvalidState {
                id: previous.id,
                status: previous.status,
            });
        }

        let drone_status = fleet
            .get(drone_id)
            .map(|d| d.status)
            .ok_or_else(|| DispatchError::drone_not_found(drone_id))?;

        if drone_status != DroneStatus::Available {
            return Err(DispatchError::DroneUnavailable {
                id: drone_id.to_string(),
                status: drone_status,
            });
        }

        if let Some(holder) = requests.holder_of(drone_id) {
            warn!(
                "Drone {} is marked available but still assigned to request {}",
                drone_id, holder.id
            );
            return Err(DispatchError::DroneUnavailable {
                id: drone_id.to_string(),
                status: drone_status,
            });
        }

        let request =
            requests.update_status(request_id, RequestStatus::Dispatched, Some(drone_id))?;

        let drone = match fleet.set_status(drone_id, DroneStatus::InFlight) {
            Ok(drone) => drone,
            Err(e) => return Err(roll_back(&mut requests, previous, e)),
        };

        Ok(DispatchResult { request, drone })
    }

    /// Close a dispatched request and return its drone to service
    pub async fn complete(&self, request_id: &str) -> Result<MedicalRequest, DispatchError> {
        let result = self.complete_locked(request_id).await;

        match &result {
            Ok(request) => {
                info!("Request {} completed", request.id);
                self.notifier
                    .notify("Request Completed", &format!("{} has been helped", request.name));
            }
            Err(e) => {
                warn!("Completion of {} refused: {}", request_id, e);
                self.notifier.notify("Completion Failed", &e.user_message());
            }
        }

        result
    }

    async fn complete_locked(&self, request_id: &str) -> Result<MedicalRequest, DispatchError> {
        let mut requests = self.requests.write().await;
        let mut fleet = self.fleet.write().await;

        let previous = requests
            .get(request_id)
            .cloned()
            .ok_or_else(|| DispatchError::request_not_found(request_id))?;

        if previous.status != RequestStatus::Dispatched {
            return Err(DispatchError::InvalidState {
                id: previous.id,
                status: previous.status,
            });
        }

        let request = requests.update_status(request_id, RequestStatus::Completed, None)?;

        // Only a drone still flying this request goes back to available
        let drone_id = request.drone_id.clone().unwrap_or_default();
        match fleet.get(&drone_id).map(|d| d.status) {
            Some(DroneStatus::InFlight) => {
                if let Err(e) = fleet.set_status(&drone_id, DroneStatus::Available) {
                    return Err(roll_back(&mut requests, previous, e));
                }
            }
            Some(status) => info!("Drone {} left as {} on completion", drone_id, status),
            None => warn!("Completed request {} references unknown drone {}", request_id, drone_id),
        }

        Ok(request)
    }

    /// Dashboard counters
    pub async fn stats(&self) -> DashboardStats {
        let requests = self.requests.read().await;
        let fleet = self.fleet.read().await;

        DashboardStats {
            pending: requests.pending().count(),
            active: requests.count_by_status(RequestStatus::Dispatched),
            available_drones: fleet.count_available(),
        }
    }

    /// All requests in display order
    pub async fn queue(&self) -> Vec<MedicalRequest> {
        priority::order(self.requests.read().await.list())
    }

    /// Snapshot of the fleet
    pub async fn drones(&self) -> Vec<Drone> {
        self.fleet.read().await.list().to_vec()
    }

    /// Drones that can take a dispatch right now
    pub async fn available_drones(&self) -> Vec<Drone> {
        self.fleet
            .read()
            .await
            .available()
            .into_iter()
            .cloned()
            .collect()
    }
}

/// Undo a committed request change after the fleet write failed
fn roll_back(
    requests: &mut RequestRegistry,
    previous: MedicalRequest,
    cause: DispatchError,
) -> DispatchError {
    let id = previous.id.clone();

    match requests.restore(previous) {
        Ok(()) => {
            warn!("Rolled back request {} after failed fleet write: {}", id, cause);
            cause
        }
        Err(rollback) => {
            error!("Request {} could not be rolled back: {}", id, rollback);
            match cause {
                DispatchError::Storage(cause) => DispatchError::RollbackFailed { cause, rollback },
                other => other,
            }
        }
    }
}
