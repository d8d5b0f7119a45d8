//! AeroReach dispatch core
//!
//! Owns the request and fleet registries, coordinates drone dispatch, orders
//! the request queue and hands critical submissions to the guidance view.
//! UI layers call into [`DispatchCoordinator`] and [`GuidanceDesk`] and render
//! the records they return.

pub mod clock;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod guidance;
pub mod notify;
pub mod registry;
pub mod seed;
pub mod storage;

pub use aeroreach_shared as shared;
pub use clock::{Clock, IdGenerator, ManualClock, SequentialIdGenerator, SystemClock};
pub use config::{DispatchConfig, StorageBackend};
pub use dispatch::{priority, DashboardStats, DispatchCoordinator, DispatchResult};
pub use error::{DispatchError, EntityKind};
pub use guidance::{EmergencyBriefing, GuidanceDesk};
pub use notify::{LogNotifier, NotificationSurface, SilentNotifier};
pub use registry::{FleetRegistry, RequestInput, RequestRegistry};
pub use storage::{KeyValueStore, StorageError};

use std::sync::Arc;
use tracing::info;

/// The wired-up core
pub struct Services {
    pub coordinator: Arc<DispatchCoordinator>,
    pub guidance: GuidanceDesk,
    pub store: Arc<dyn KeyValueStore>,
    pub clock: Arc<dyn Clock>,
}

/// Open storage and load both registries as `config` describes
pub fn bootstrap(
    config: &DispatchConfig,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn NotificationSurface>,
) -> Result<Services, DispatchError> {
    let store = config.open_store()?;
    let ids = Arc::new(SequentialIdGenerator::new(config.id_prefix.clone(), clock.clone()));

    let seeds = if config.seed_demo_requests {
        seed::demo_requests(clock.now_ms())
    } else {
        Vec::new()
    };

    let requests = RequestRegistry::load(store.clone(), clock.clone(), ids, seeds)?;
    let fleet = FleetRegistry::load(store.clone(), seed::fleet_roster(requests.list()))?;
    let coordinator = DispatchCoordinator::new(requests, fleet).with_notifier(notifier);

    info!("Dispatch core ready ({} store)", store.name());

    Ok(Services {
        coordinator: Arc::new(coordinator),
        guidance: GuidanceDesk::new(store.clone(), clock.clone()),
        store,
        clock,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeroreach_shared::{DroneStatus, RequestStatus};

    #[tokio::test]
    async fn test_bootstrap_with_demo_data() {
        let services = bootstrap(
            &DispatchConfig::default(),
            Arc::new(ManualClock::new(3_600_000)),
            Arc::new(SilentNotifier),
        )
        .expect("bootstrap failed");

        let stats = services.coordinator.stats().await;
        assert_eq!(
            stats,
            DashboardStats {
                pending: 2,
                active: 1,
                available_drones: 2,
            }
        );

        // John Smith's emergency outranks Sarah Johnson's older one
        let queue = services.coordinator.queue().await;
        let ids: Vec<&str> = queue.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_state_survives_restart_in_directory_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = DispatchConfig {
            storage: StorageBackend::Directory(dir.path().to_path_buf()),
            seed_demo_requests: true,
            id_prefix: "req".into(),
        };
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(3_600_000));

        let first = bootstrap(&config, clock.clone(), Arc::new(SilentNotifier)).unwrap();
        first.coordinator.dispatch("1", "drone-3").await.expect("dispatch failed");
        drop(first);

        let second = bootstrap(&config, clock, Arc::new(SilentNotifier)).unwrap();
        let requests = second.coordinator.requests();
        let fleet = second.coordinator.fleet();
        assert_eq!(requests.read().await.get("1").unwrap().status, RequestStatus::Dispatched);
        assert_eq!(fleet.read().await.get("drone-3").unwrap().status, DroneStatus::InFlight);
    }

    #[test]
    fn test_bootstrap_without_demo_requests() {
        let config = DispatchConfig {
            seed_demo_requests: false,
            ..Default::default()
        };
        let services =
            bootstrap(&config, Arc::new(ManualClock::new(0)), Arc::new(SilentNotifier)).unwrap();

        let requests = services.coordinator.requests();
        let requests = requests.try_read().expect("uncontended");
        assert!(requests.is_empty());

        let fleet = services.coordinator.fleet();
        let fleet = fleet.try_read().expect("uncontended");
        for drone in fleet.list().iter().filter(|d| d.status == DroneStatus::InFlight) {
            assert!(requests.holder_of(&drone.id).is_some(), "{} in flight unassigned", drone.id);
        }
        assert_eq!(fleet.count_available(), 3);
    }
}
