//! Screen history and drawer state.

use studymate_core::navigation::{NavigationState, Screen};

use super::notification_center::NotificationCenter;

/// Warning raised when a guarded screen is requested with nothing uploaded.
pub const UPLOAD_REQUIRED_MESSAGE: &str = "Please upload a document first";

/// Result of a [`NavigationController::go_to`] request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The screen was pushed onto the history.
    Moved,
    /// Already on that screen; nothing changed.
    Unchanged,
    /// The screen needs a study artifact and none is loaded.
    Rejected,
}

#[derive(Debug, Default)]
pub struct NavigationController {
    state: NavigationState,
}

impl NavigationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn current(&self) -> Screen {
        self.state.current()
    }

    /// Pushes `screen` unless it is guarded and `artifact_present` is false.
    ///
    /// A rejection raises exactly one warning. Any successful move closes the
    /// drawer.
    pub fn go_to(
        &mut self,
        screen: Screen,
        artifact_present: bool,
        notifications: &mut NotificationCenter,
    ) -> NavigationOutcome {
        if screen.requires_artifact() && !artifact_present {
            tracing::debug!("[Navigation] Rejected {}: no study artifact", screen);
            notifications.warning(UPLOAD_REQUIRED_MESSAGE);
            return NavigationOutcome::Rejected;
        }

        self.state.drawer_open = false;
        if self.state.push(screen) {
            tracing::debug!("[Navigation] -> {}", screen);
            NavigationOutcome::Moved
        } else {
            NavigationOutcome::Unchanged
        }
    }

    /// Pops one screen. Returns `false` at the floor.
    pub fn go_back(&mut self) -> bool {
        let moved = self.state.pop();
        if moved {
            tracing::debug!("[Navigation] <- {}", self.state.current());
        }
        moved
    }

    pub fn toggle_drawer(&mut self) -> bool {
        self.state.drawer_open = !self.state.drawer_open;
        self.state.drawer_open
    }

    pub fn set_drawer(&mut self, open: bool) {
        self.state.drawer_open = open;
    }

    /// Back to `[Entry]` with the drawer closed.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studymate_core::notification::Severity;

    #[test]
    fn test_guarded_screen_without_artifact_is_rejected() {
        let mut nav = NavigationController::new();
        let mut notifications = NotificationCenter::new();

        let outcome = nav.go_to(Screen::Quiz, false, &mut notifications);

        assert_eq!(outcome, NavigationOutcome::Rejected);
        assert_eq!(nav.current(), Screen::Entry);
        assert_eq!(notifications.shown_count(), 1);
        assert_eq!(
            notifications.current().unwrap().severity,
            Severity::Warning
        );
    }

    #[test]
    fn test_guarded_screen_with_artifact_moves() {
        let mut nav = NavigationController::new();
        let mut notifications = NotificationCenter::new();

        assert_eq!(
            nav.go_to(Screen::ConceptMap, true, &mut notifications),
            NavigationOutcome::Moved
        );
        assert_eq!(nav.state().history(), &[Screen::Entry, Screen::ConceptMap]);
        assert_eq!(notifications.shown_count(), 0);
    }

    #[test]
    fn test_move_closes_drawer() {
        let mut nav = NavigationController::new();
        let mut notifications = NotificationCenter::new();
        nav.set_drawer(true);

        nav.go_to(Screen::History, false, &mut notifications);
        assert!(!nav.state().drawer_open);
    }

    #[test]
    fn test_self_transition_is_unchanged() {
        let mut nav = NavigationController::new();
        let mut notifications = NotificationCenter::new();
        nav.go_to(Screen::Upload, false, &mut notifications);

        assert_eq!(
            nav.go_to(Screen::Upload, false, &mut notifications),
            NavigationOutcome::Unchanged
        );
        assert_eq!(nav.state().history().len(), 2);
    }

    #[test]
    fn test_go_back_floor() {
        let mut nav = NavigationController::new();
        let mut notifications = NotificationCenter::new();
        nav.go_to(Screen::Auth, false, &mut notifications);

        assert!(nav.go_back());
        assert!(!nav.go_back());
        assert_eq!(nav.current(), Screen::Entry);
    }

    #[test]
    fn test_toggle_drawer() {
        let mut nav = NavigationController::new();
        assert!(nav.toggle_drawer());
        assert!(!nav.toggle_drawer());
    }
}
