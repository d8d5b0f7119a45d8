//! Emergency guidance: hands a critical submission over to the tips view

use crate::clock::Clock;
use crate::storage::{self, KeyValueStore, StorageError, CURRENT_EMERGENCY_KEY};
use aeroreach_shared::guidance::{tips_for, EtaCountdown, DEFAULT_TIPS_KEY};
use aeroreach_shared::EmergencyNotice;
use std::sync::Arc;
use tracing::{debug, warn};

/// Location shown when the hand-off record carries none
pub const DEFAULT_LOCATION: &str = "Your current location";

/// Everything the emergency view shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyBriefing {
    pub injury_type: String,
    pub location: String,
    pub tips: &'static [&'static str],
    pub eta: EtaCountdown,
}

/// Reads the emergency hand-off and builds briefings
pub struct GuidanceDesk {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl GuidanceDesk {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Read the pending emergency notice, removing it so it is seen once
    pub fn take_current_emergency(&self) -> Result<Option<EmergencyNotice>, StorageError> {
        let notice: Option<EmergencyNotice> =
            storage::load_document(self.store.as_ref(), CURRENT_EMERGENCY_KEY)?;

        if notice.is_some() {
            if let Err(e) = self.store.remove(CURRENT_EMERGENCY_KEY) {
                warn!("Emergency notice read but not cleared: {}", e);
            }
        }

        Ok(notice)
    }

    /// Briefing for the current emergency, or a generic one when there is none
    pub fn open_briefing(&self) -> Result<EmergencyBriefing, StorageError> {
        let notice = self.take_current_emergency()?.unwrap_or_default();

        let injury_type = if notice.injury_type.is_empty() {
            DEFAULT_TIPS_KEY.to_string()
        } else {
            notice.injury_type
        };
        let location = if notice.location.is_empty() {
            DEFAULT_LOCATION.to_string()
        } else {
            notice.location
        };

        debug!("Briefing opened for {} at {}", injury_type, location);

        Ok(EmergencyBriefing {
            tips: tips_for(&injury_type),
            injury_type,
            location,
            eta: EtaCountdown::start(self.clock.now_ms()),
        })
    }
}
