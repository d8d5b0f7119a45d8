//! Demo data: the fleet roster and example requests

use aeroreach_shared::{Drone, DroneStatus, InjuryCategory, MedicalRequest, RequestStatus};

const MINUTE_MS: u64 = 60_000;

/// The fixed fleet
///
/// A drone is in flight only while one of `requests` holds it; the rest keep
/// their idle status.
pub fn fleet_roster(requests: &[MedicalRequest]) -> Vec<Drone> {
    let mut roster = vec![
        Drone::new("drone-1", "AeroMed-01", DroneStatus::Available, 85),
        Drone::new("drone-2", "AeroMed-02", DroneStatus::Available, 92),
        Drone::new("drone-3", "AeroMed-03", DroneStatus::Available, 78),
        Drone::new("drone-4", "AeroMed-04", DroneStatus::Charging, 45),
    ];

    for drone in roster.iter_mut() {
        if requests.iter().any(|r| r.holds_drone(&drone.id)) {
            drone.status = DroneStatus::InFlight;
        }
    }

    roster
}

/// Example requests timestamped relative to `now_ms`
///
/// The dispatched example holds drone-1, which the roster has in flight.
pub fn demo_requests(now_ms: u64) -> Vec<MedicalRequest> {
    let minutes_ago = |m: u64| now_ms.saturating_sub(m * MINUTE_MS);

    vec![
        MedicalRequest {
            id: "1".into(),
            name: "John Smith".into(),
            age: 45,
            location: "123 Main Street, Downtown".into(),
            injury_category: InjuryCategory::Trauma,
            injury_type: "heavy_bleeding".into(),
            description: "Deep cut on forearm".into(),
            status: RequestStatus::Pending,
            is_emergency: true,
            drone_id: None,
            timestamp: minutes_ago(5),
        },
        MedicalRequest {
            id: "2".into(),
            name: "Sarah Johnson".into(),
            age: 32,
            location: "456 Oak Avenue, Riverside".into(),
            injury_category: InjuryCategory::Postpartum,
            injury_type: "postpartum_hemorrhage".into(),
            description: "Heavy bleeding after delivery".into(),
            status: RequestStatus::Dispatched,
            is_emergency: true,
            drone_id: Some("drone-1".into()),
            timestamp: minutes_ago(15),
        },
        MedicalRequest {
            id: "3".into(),
            name: "Mike Brown".into(),
            age: 28,
            location: "789 Pine Road, Hillside".into(),
            injury_category: InjuryCategory::Chronic,
            injury_type: "diabetic_emergency".into(),
            description: "Low blood sugar episode".into(),
            status: RequestStatus::Pending,
            is_emergency: false,
            drone_id: None,
            timestamp: minutes_ago(10),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeroreach_shared::taxonomy;

    #[test]
    fn test_demo_requests_match_taxonomy() {
        for req in demo_requests(60 * MINUTE_MS) {
            let (_, entry) = taxonomy::lookup(req.injury_category.key(), &req.injury_type)
                .expect("seeded type is in the taxonomy");
            assert_eq!(req.is_emergency, entry.critical, "{}", req.id);
            assert!(req.is_consistent(), "{}", req.id);
        }
    }

    #[test]
    fn test_seeded_assignment_matches_fleet() {
        let requests = demo_requests(0);
        let fleet = fleet_roster(&requests);
        for req in requests.iter().filter(|r| r.drone_id.is_some()) {
            let drone = fleet
                .iter()
                .find(|d| Some(&d.id) == req.drone_id.as_ref())
                .expect("assigned drone exists");
            assert_eq!(drone.status, DroneStatus::InFlight);
        }
        assert_eq!(fleet[0].status, DroneStatus::InFlight);
    }

    #[test]
    fn test_roster_without_requests_has_nothing_in_flight() {
        let fleet = fleet_roster(&[]);
        assert!(fleet.iter().all(|d| d.status != DroneStatus::InFlight));
        assert_eq!(fleet[3].status, DroneStatus::Charging);
    }

    #[test]
    fn test_timestamps_relative_to_now() {
        let now = 60 * MINUTE_MS;
        let requests = demo_requests(now);
        assert_eq!(requests[0].timestamp, now - 5 * MINUTE_MS);
        assert_eq!(requests[1].timestamp, now - 15 * MINUTE_MS);
    }
}
