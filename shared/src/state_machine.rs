//! Request Lifecycle State Machine
//!
//! Defines the valid status transitions of a medical request and the drone
//! reference each status requires. The progression is linear:
//! pending -> dispatched -> completed.

use crate::{MedicalRequest, RequestStatus};

/// Result of a status transition attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionResult {
    /// Transition was valid and the request now has this status
    Success(RequestStatus),
    /// Status change does not follow the lifecycle
    Invalid { from: RequestStatus, to: RequestStatus },
    /// Drone reference does not fit the target status
    DroneMismatch { to: RequestStatus, reason: &'static str },
}

impl TransitionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, TransitionResult::Success(_))
    }
}

/// Check if a status change follows the lifecycle
pub fn is_valid_transition(from: RequestStatus, to: RequestStatus) -> bool {
    use RequestStatus::*;

    match (from, to) {
        (Pending, Dispatched) => true,
        (Dispatched, Completed) => true,

        // Staying put, skipping a step or going backwards
        _ => false,
    }
}

/// Evaluate a transition without applying it
///
/// `drone_id` must be given when dispatching. On completion it may be
/// omitted, otherwise it must name the drone already assigned.
pub fn check(
    request: &MedicalRequest,
    to: RequestStatus,
    drone_id: Option<&str>,
) -> TransitionResult {
    if !is_valid_transition(request.status, to) {
        return TransitionResult::Invalid {
            from: request.status,
            to,
        };
    }

    match (to, drone_id) {
        (RequestStatus::Dispatched, None) => TransitionResult::DroneMismatch {
            to,
            reason: "dispatch requires a drone",
        },
        (RequestStatus::Dispatched, Some(id)) if id.is_empty() => TransitionResult::DroneMismatch {
            to,
            reason: "dispatch requires a drone",
        },
        (RequestStatus::Completed, Some(id)) if request.drone_id.as_deref() != Some(id) => {
            TransitionResult::DroneMismatch {
                to,
                reason: "completion must keep the assigned drone",
            }
        }
        _ => TransitionResult::Success(to),
    }
}

/// Apply a transition to the request if it is valid
pub fn apply(
    request: &mut MedicalRequest,
    to: RequestStatus,
    drone_id: Option<&str>,
) -> TransitionResult {
    let result = check(request, to, drone_id);

    if result.is_success() {
        request.status = to;
        if let Some(id) = drone_id {
            request.drone_id = Some(id.to_string());
        }
    }

    result
}
