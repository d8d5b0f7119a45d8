//! Emergency view: first-aid tips and the arrival countdown

use aeroreach_dispatch::{EmergencyBriefing, GuidanceDesk, StorageError};
use aeroreach_shared::guidance::EtaCountdown;

/// The emergency page for one critical submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyView {
    pub location: String,
    pub tips: Vec<String>,
    eta: EtaCountdown,
}

impl EmergencyView {
    /// Open the view, consuming the pending emergency notice if any
    pub fn open(desk: &GuidanceDesk) -> Result<Self, StorageError> {
        desk.open_briefing().map(Self::from)
    }

    pub fn minutes(&self, now_ms: u64) -> u32 {
        self.eta.minutes_remaining(now_ms)
    }

    pub fn eta_line(&self, now_ms: u64) -> String {
        if self.eta.is_arriving(now_ms) {
            format!("Drone arriving in {} minute", self.minutes(now_ms))
        } else {
            format!("Drone arriving in {} minutes", self.minutes(now_ms))
        }
    }

    pub fn lines(&self, now_ms: u64) -> Vec<String> {
        let mut lines = vec![
            format!("Help is on the way to {}", self.location),
            self.eta_line(now_ms),
        ];
        lines.extend(
            self.tips
                .iter()
                .enumerate()
                .map(|(i, tip)| format!("{}. {}", i + 1, tip)),
        );
        lines
    }
}

impl From<EmergencyBriefing> for EmergencyView {
    fn from(briefing: EmergencyBriefing) -> Self {
        Self {
            location: briefing.location,
            tips: briefing.tips.iter().map(|t| t.to_string()).collect(),
            eta: briefing.eta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::{IntakeDesk, IntakeOutcome};
    use crate::testing::{services, RecordingNotifier};
    use aeroreach_dispatch::{Clock, RequestInput};
    use std::sync::Arc;

    const MINUTE_MS: u64 = 60_000;

    #[tokio::test]
    async fn test_view_after_critical_submission() {
        let notifier = Arc::new(RecordingNotifier::default());
        let (services, clock) = services(notifier.clone());
        let desk = IntakeDesk::new(services.coordinator.clone(), notifier);

        let form = RequestInput {
            name: "Tom Okafor".into(),
            age: "61".into(),
            location: "Harbour Quay 4".into(),
            injury_category: "trauma".into(),
            injury_type: "heavy_bleeding".into(),
            description: String::new(),
        };
        assert!(matches!(desk.submit(form).await, IntakeOutcome::Emergency(_)));

        let opened_at = services.clock.now_ms();
        let view = EmergencyView::open(&services.guidance).unwrap();
        assert_eq!(view.location, "Harbour Quay 4");
        assert_eq!(view.tips[0], "Apply firm, direct pressure to the wound");

        assert_eq!(view.minutes(opened_at), 8);
        clock.advance(3 * MINUTE_MS);
        assert_eq!(view.minutes(services.clock.now_ms()), 5);
        clock.advance(60 * MINUTE_MS);
        let now = services.clock.now_ms();
        assert_eq!(view.minutes(now), 1);
        assert_eq!(view.eta_line(now), "Drone arriving in 1 minute");
    }

    #[tokio::test]
    async fn test_view_without_notice() {
        let (services, _) = services(Arc::new(RecordingNotifier::default()));
        let view = EmergencyView::open(&services.guidance).unwrap();

        assert_eq!(view.location, "Your current location");
        let lines = view.lines(services.clock.now_ms());
        assert_eq!(lines[1], "Drone arriving in 8 minutes");
        assert_eq!(lines.len(), 2 + view.tips.len());
        assert!(lines[2].starts_with("1. "));
    }
}
