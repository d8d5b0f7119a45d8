//! Notification surface for reporting outcomes to whoever is watching

use tracing::info;

/// Fire-and-forget user notification
///
/// Callers never depend on delivery.
pub trait NotificationSurface: Send + Sync {
    fn notify(&self, title: &str, message: &str);
}

/// Notifier that writes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl NotificationSurface for LogNotifier {
    fn notify(&self, title: &str, message: &str) {
        info!(target: "aeroreach::notify", "[{}] {}", title, message);
    }
}

/// Notifier that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl NotificationSurface for SilentNotifier {
    fn notify(&self, _title: &str, _message: &str) {}
}
