//! Request registry for all known medical requests

use crate::clock::{Clock, IdGenerator};
use crate::error::DispatchError;
use crate::storage::{self, KeyValueStore, StorageError, CURRENT_EMERGENCY_KEY, REQUESTS_KEY};
use aeroreach_shared::state_machine::{self, TransitionResult};
use aeroreach_shared::{EmergencyNotice, InjuryCategory, MedicalRequest, RequestStatus};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Raw form values of a submission; nothing here is trusted yet
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    pub name: String,
    pub age: String,
    pub location: String,
    pub injury_category: String,
    pub injury_type: String,
    pub description: String,
}

/// Fields that passed validation
struct ValidSubmission {
    name: String,
    age: u32,
    location: String,
    category: InjuryCategory,
    injury_type: &'static str,
    critical: bool,
}

fn validate(input: &RequestInput) -> Result<ValidSubmission, DispatchError> {
    let mut fields = Vec::new();

    let name = input.name.trim();
    if name.is_empty() {
        fields.push("name");
    }

    let age = match input.age.trim().parse::<u32>() {
        Ok(age) if age > 0 => Some(age),
        _ => {
            fields.push("age");
            None
        }
    };

    let location = input.location.trim();
    if location.is_empty() {
        fields.push("location");
    }

    let category = input.injury_category.trim().parse::<InjuryCategory>().ok();
    if category.is_none() {
        fields.push("injuryCategory");
    }

    let injury = category.and_then(|c| c.find_type(input.injury_type.trim()));
    if injury.is_none() {
        fields.push("injuryType");
    }

    match (age, category, injury) {
        (Some(age), Some(category), Some(injury)) if fields.is_empty() => Ok(ValidSubmission {
            name: name.to_string(),
            age,
            location: location.to_string(),
            category,
            injury_type: injury.id,
            critical: injury.critical,
        }),
        _ => Err(DispatchError::Validation {
            fields: fields.into_iter().map(String::from).collect(),
        }),
    }
}

/// Owns every known request: seeded defaults plus persisted submissions
pub struct RequestRegistry {
    requests: Vec<MedicalRequest>,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl RequestRegistry {
    /// Build the registry from seeds and whatever the store already holds
    ///
    /// A persisted record replaces the seed with the same id. Records that
    /// break the drone-reference invariant are skipped.
    pub fn load(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        seeds: Vec<MedicalRequest>,
    ) -> Result<Self, DispatchError> {
        let persisted: Vec<MedicalRequest> = storage::load_document(store.as_ref(), REQUESTS_KEY)?;
        let mut requests = seeds;

        for record in persisted {
            if !record.is_consistent() {
                warn!(
                    "Skipping stored request {}: status {} with drone {:?}",
                    record.id, record.status, record.drone_id
                );
                continue;
            }

            match requests.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => *existing = record,
                None => requests.push(record),
            }
        }

        info!(
            "Request registry loaded from {} store: {} requests",
            store.name(),
            requests.len()
        );

        Ok(Self {
            requests,
            store,
            clock,
            ids,
        })
    }

    /// Validate and store a new request
    ///
    /// Critical requests also leave an emergency notice for the guidance
    /// surface.
    pub fn submit(&mut self, input: RequestInput) -> Result<MedicalRequest, DispatchError> {
        let valid = match validate(&input) {
            Ok(v) => v,
            Err(e) => {
                debug!("Rejected submission: {}", e);
                return Err(e);
            }
        };

        let request = MedicalRequest {
            id: self.ids.next_id(),
            name: valid.name,
            age: valid.age,
            location: valid.location,
            injury_category: valid.category,
            injury_type: valid.injury_type.to_string(),
            description: input.description.trim().to_string(),
            status: RequestStatus::Pending,
            is_emergency: valid.critical,
            drone_id: None,
            timestamp: self.clock.now_ms(),
        };

        self.persist(self.requests.iter().chain(std::iter::once(&request)))?;
        self.requests.push(request.clone());

        info!(
            "Request {} submitted: {} ({}) emergency={}",
            request.id, request.injury_type, request.injury_category, request.is_emergency
        );

        if request.is_emergency {
            let notice = EmergencyNotice {
                injury_type: request.injury_type.clone(),
                location: request.location.clone(),
            };
            // Best effort: the request is already stored
            let saved =
                storage::save_document(self.store.as_ref(), CURRENT_EMERGENCY_KEY, &notice);
            if let Err(e) = saved {
                warn!("Failed to record emergency notice for {}: {}", request.id, e);
            }
        }

        Ok(request)
    }

    /// All known requests, in load/submission order
    pub fn list(&self) -> &[MedicalRequest] {
        &self.requests
    }

    pub fn get(&self, id: &str) -> Option<&MedicalRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Requests still waiting for a drone
    pub fn pending(&self) -> impl Iterator<Item = &MedicalRequest> {
        self.requests
            .iter()
            .filter(|r| r.status == RequestStatus::Pending)
    }

    pub fn count_by_status(&self, status: RequestStatus) -> usize {
        self.requests.iter().filter(|r| r.status == status).count()
    }

    /// The active request currently holding a drone, if any
    pub fn holder_of(&self, drone_id: &str) -> Option<&MedicalRequest> {
        self.requests.iter().find(|r| r.holds_drone(drone_id))
    }

    /// Move a request along its lifecycle
    ///
    /// The new state is written to storage first; memory only changes once
    /// the write succeeds.
    pub fn update_status(
        &mut self,
        id: &str,
        new_status: RequestStatus,
        drone_id: Option<&str>,
    ) -> Result<MedicalRequest, DispatchError> {
        let index = self
            .requests
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| DispatchError::request_not_found(id))?;

        let current = &self.requests[index];
        let mut updated = current.clone();

        match state_machine::apply(&mut updated, new_status, drone_id) {
            TransitionResult::Success(_) => {}
            TransitionResult::Invalid { from, to } => {
                return Err(DispatchError::InvalidTransition {
                    id: id.to_string(),
                    from,
                    to,
                    reason: "status must advance one step at a time".into(),
                });
            }
            TransitionResult::DroneMismatch { to, reason } => {
                return Err(DispatchError::InvalidTransition {
                    id: id.to_string(),
                    from: current.status,
                    to,
                    reason: reason.into(),
                });
            }
        }

        if new_status == RequestStatus::Dispatched {
            if let Some(holder) = drone_id.and_then(|d| self.holder_of(d)) {
                return Err(DispatchError::InvalidTransition {
                    id: id.to_string(),
                    from: current.status,
                    to: new_status,
                    reason: format!("drone already assigned to request {}", holder.id),
                });
            }
        }

        self.persist(
            self.requests
                .iter()
                .enumerate()
                .map(|(i, r)| if i == index { &updated } else { r }),
        )?;

        debug!(
            "Request {} {} -> {} (drone {:?})",
            id, self.requests[index].status, updated.status, updated.drone_id
        );
        self.requests[index] = updated.clone();

        Ok(updated)
    }

    /// Put back a record captured before a failed multi-entity change
    ///
    /// Memory is restored even when the write fails.
    pub(crate) fn restore(&mut self, previous: MedicalRequest) -> Result<(), StorageError> {
        let Some(index) = self.requests.iter().position(|r| r.id == previous.id) else {
            return Ok(());
        };

        self.requests[index] = previous;
        self.persist(self.requests.iter())
    }

    fn persist<'a>(
        &self,
        records: impl Iterator<Item = &'a MedicalRequest>,
    ) -> Result<(), StorageError> {
        let staged: Vec<&MedicalRequest> = records.collect();
        storage::save_document(self.store.as_ref(), REQUESTS_KEY, &staged)
    }
}
