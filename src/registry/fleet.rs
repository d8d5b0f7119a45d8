//! Fleet registry for the fixed set of drones

use crate::error::DispatchError;
use crate::storage::{self, KeyValueStore, DRONES_KEY};
use aeroreach_shared::{limits, Drone, DroneStatus};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Owns the drone fleet
pub struct FleetRegistry {
    drones: Vec<Drone>,
    store: Arc<dyn KeyValueStore>,
}

impl FleetRegistry {
    /// Build the fleet from its fixed roster, applying persisted status and
    /// battery for drones on that roster
    pub fn load(store: Arc<dyn KeyValueStore>, roster: Vec<Drone>) -> Result<Self, DispatchError> {
        let persisted: Vec<Drone> = storage::load_document(store.as_ref(), DRONES_KEY)?;
        let mut drones = roster;

        for record in persisted {
            match drones.iter_mut().find(|d| d.id == record.id) {
                Some(drone) => {
                    drone.status = record.status;
                    drone.battery = record.battery.min(limits::BATTERY_MAX_PERCENT);
                }
                None => warn!("Ignoring stored drone {} not on the fleet roster", record.id),
            }
        }

        info!(
            "Fleet loaded: {} drones, {} available",
            drones.len(),
            drones.iter().filter(|d| d.is_available()).count()
        );

        Ok(Self { drones, store })
    }

    pub fn list(&self) -> &[Drone] {
        &self.drones
    }

    pub fn get(&self, id: &str) -> Option<&Drone> {
        self.drones.iter().find(|d| d.id == id)
    }

    /// Drones ready to be dispatched
    pub fn available(&self) -> Vec<&Drone> {
        self.drones.iter().filter(|d| d.is_available()).collect()
    }

    pub fn count_available(&self) -> usize {
        self.drones.iter().filter(|d| d.is_available()).count()
    }

    /// Change a drone's status, writing the fleet before applying it
    pub fn set_status(&mut self, id: &str, status: DroneStatus) -> Result<Drone, DispatchError> {
        let index = self
            .drones
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| DispatchError::drone_not_found(id))?;

        let mut updated = self.drones[index].clone();
        updated.status = status;

        let staged: Vec<&Drone> = self
            .drones
            .iter()
            .enumerate()
            .map(|(i, d)| if i == index { &updated } else { d })
            .collect();
        storage::save_document(self.store.as_ref(), DRONES_KEY, &staged)?;

        debug!("Drone {} {} -> {}", id, self.drones[index].status, status);
        self.drones[index] = updated.clone();

        Ok(updated)
    }
}
