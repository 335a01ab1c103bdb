//! NotificationCenter - the single visible message.

use studymate_core::notification::{Notification, Severity};

/// Single-slot notification queue.
///
/// A new notification replaces whatever is visible; nothing is queued.
/// Auto-dismiss timing belongs to the presentation layer.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    current: Option<Notification>,
    shown: u64,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity) {
        let notification = Notification::new(message, severity);
        tracing::debug!(
            "[NotificationCenter] {}: {}",
            notification.severity,
            notification.message
        );
        self.current = Some(notification);
        self.shown += 1;
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.show(message, Severity::Info);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message, Severity::Success);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.show(message, Severity::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message, Severity::Error);
    }

    pub fn dismiss(&mut self) {
        if let Some(current) = self.current.as_mut() {
            current.visible = false;
        }
    }

    /// The visible notification, if any.
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref().filter(|n| n.visible)
    }

    /// Total notifications raised since creation.
    pub fn shown_count(&self) -> u64 {
        self.shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notification_preempts_current() {
        let mut center = NotificationCenter::new();
        center.info("first");
        center.error("second");

        let current = center.current().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.severity, Severity::Error);
        assert_eq!(center.shown_count(), 2);
    }

    #[test]
    fn test_dismiss_hides() {
        let mut center = NotificationCenter::new();
        center.success("done");
        center.dismiss();
        assert!(center.current().is_none());

        // Dismissing with nothing visible is harmless.
        center.dismiss();
        assert!(center.current().is_none());
    }
}
