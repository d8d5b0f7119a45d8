//! Errors surfaced by the registries and the dispatch coordinator

use crate::storage::StorageError;
use aeroreach_shared::{DroneStatus, RequestStatus};
use std::fmt;
use thiserror::Error;

/// Kind of entity a lookup failed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Request,
    Drone,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Request => write!(f, "request"),
            EntityKind::Drone => write!(f, "drone"),
        }
    }
}

/// Errors from request submission, status changes and dispatch
///
/// All variants are recoverable at the call site.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Invalid submission, check: {}", .fields.join(", "))]
    Validation { fields: Vec<String> },

    #[error("Unknown {kind}: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Request {id} is already {status}")]
    InvalidState { id: String, status: RequestStatus },

    #[error("Request {id} cannot move from {from} to {to}: {reason}")]
    InvalidTransition {
        id: String,
        from: RequestStatus,
        to: RequestStatus,
        reason: String,
    },

    #[error("Drone {id} is not available (status: {status})")]
    DroneUnavailable { id: String, status: DroneStatus },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Rollback failed after {cause}: {rollback}")]
    RollbackFailed {
        cause: StorageError,
        rollback: StorageError,
    },
}

impl DispatchError {
    pub(crate) fn request_not_found(id: &str) -> Self {
        DispatchError::NotFound {
            kind: EntityKind::Request,
            id: id.to_string(),
        }
    }

    pub(crate) fn drone_not_found(id: &str) -> Self {
        DispatchError::NotFound {
            kind: EntityKind::Drone,
            id: id.to_string(),
        }
    }

    /// Message shown to the person who triggered the operation
    pub fn user_message(&self) -> String {
        match self {
            DispatchError::Validation { fields } => {
                format!("Please fill in all required fields: {}", fields.join(", "))
            }
            DispatchError::NotFound { .. } => {
                "That item is no longer available. Please refresh and try again.".into()
            }
            DispatchError::InvalidState { .. } | DispatchError::InvalidTransition { .. } => {
                "This request has already been handled.".into()
            }
            DispatchError::DroneUnavailable { .. } => {
                "That drone is no longer available. Refresh the fleet list and pick another.".into()
            }
            DispatchError::Storage(_) | DispatchError::RollbackFailed { .. } => {
                "Could not save the change. Please try again.".into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_lists_fields() {
        let err = DispatchError::Validation {
            fields: vec!["age".into(), "location".into()],
        };
        assert_eq!(err.to_string(), "Invalid submission, check: age, location");
        assert!(err.user_message().contains("age, location"));
    }

    #[test]
    fn test_not_found_display() {
        let err = DispatchError::drone_not_found("drone-9");
        assert_eq!(err.to_string(), "Unknown drone: drone-9");
    }

    #[test]
    fn test_lifecycle_errors_share_message() {
        let state = DispatchError::InvalidState {
            id: "req-1".into(),
            status: RequestStatus::Dispatched,
        };
        let transition = DispatchError::InvalidTransition {
            id: "req-1".into(),
            from: RequestStatus::Completed,
            to: RequestStatus::Pending,
            reason: "status regression".into(),
        };
        assert_eq!(state.user_message(), transition.user_message());
    }
}
