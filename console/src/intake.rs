//! Request intake: the injury report form

use aeroreach_dispatch::{DispatchCoordinator, DispatchError, NotificationSurface, RequestInput};
use aeroreach_shared::{InjuryCategory, InjuryType, MedicalRequest};
use std::sync::Arc;
use tracing::info;

/// What the form does after a submission
#[derive(Debug)]
pub enum IntakeOutcome {
    /// Stored; the user goes back to the start page
    Submitted(MedicalRequest),
    /// Stored and critical; the user is routed to the emergency view
    Emergency(MedicalRequest),
    /// Not stored; the form stays open
    Rejected(DispatchError),
}

/// Injury types offered once a category is picked; unknown categories offer none
pub fn injury_options(category: &str) -> &'static [InjuryType] {
    category
        .parse::<InjuryCategory>()
        .map(|c| c.types())
        .unwrap_or(&[])
}

/// Handles form submissions
pub struct IntakeDesk {
    coordinator: Arc<DispatchCoordinator>,
    notifier: Arc<dyn NotificationSurface>,
}

impl IntakeDesk {
    pub fn new(
        coordinator: Arc<DispatchCoordinator>,
        notifier: Arc<dyn NotificationSurface>,
    ) -> Self {
        Self { coordinator, notifier }
    }

    pub async fn submit(&self, form: RequestInput) -> IntakeOutcome {
        match self.coordinator.submit(form).await {
            Ok(request) if request.is_emergency => {
                info!("Critical request {} routed to emergency view", request.id);
                self.notifier.notify(
                    "Drone Dispatch Initiated",
                    "Critical injury detected. A drone will be dispatched immediately.",
                );
                IntakeOutcome::Emergency(request)
            }
            Ok(request) => {
                self.notifier
                    .notify("Request Submitted", "Your request has been received.");
                IntakeOutcome::Submitted(request)
            }
            Err(e) => {
                self.notifier.notify("Error", &e.user_message());
                IntakeOutcome::Rejected(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{services, RecordingNotifier};

    fn form(category: &str, injury_type: &str) -> RequestInput {
        RequestInput {
            name: "Amina Yusuf".into(),
            age: "27".into(),
            location: "22 Ferry Road".into(),
            injury_category: category.into(),
            injury_type: injury_type.into(),
            description: String::new(),
        }
    }

    #[test]
    fn test_injury_options() {
        let ids: Vec<&str> = injury_options("gbv").iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["gbv_emergency", "assault"]);
        assert!(injury_options("").is_empty());
    }

    #[tokio::test]
    async fn test_routine_submission() {
        let notifier = Arc::new(RecordingNotifier::default());
        let (services, _) = services(notifier.clone());
        let desk = IntakeDesk::new(services.coordinator.clone(), notifier.clone());

        let outcome = desk.submit(form("chronic", "asthma_attack")).await;
        assert!(matches!(outcome, IntakeOutcome::Submitted(_)));
        assert_eq!(notifier.titles(), vec!["Request Submitted"]);
    }

    #[tokio::test]
    async fn test_critical_submission_routes_to_emergency() {
        let notifier = Arc::new(RecordingNotifier::default());
        let (services, _) = services(notifier.clone());
        let desk = IntakeDesk::new(services.coordinator.clone(), notifier.clone());

        let outcome = desk.submit(form("gbv", "gbv_emergency")).await;
        match outcome {
            IntakeOutcome::Emergency(req) => assert!(req.is_emergency),
            other => panic!("expected emergency routing, got {:?}", other),
        }

        let briefing = services.guidance.open_briefing().unwrap();
        assert_eq!(briefing.location, "22 Ferry Road");
    }

    #[tokio::test]
    async fn test_invalid_submission_reported() {
        let notifier = Arc::new(RecordingNotifier::default());
        let (services, _) = services(notifier.clone());
        let desk = IntakeDesk::new(services.coordinator.clone(), notifier.clone());

        let mut bad = form("trauma", "burn");
        bad.age = "abc".into();

        let outcome = desk.submit(bad).await;
        assert!(matches!(
            outcome,
            IntakeOutcome::Rejected(DispatchError::Validation { .. })
        ));
        let (title, message) = notifier.last().expect("notified");
        assert_eq!(title, "Error");
        assert!(message.contains("age"));
    }
}
