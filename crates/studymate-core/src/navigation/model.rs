//! Navigation state model.

use serde::Serialize;

use super::screen::Screen;

/// Current screen, the traversable history that led to it, and whether the
/// session drawer is open.
///
/// The history is never empty and its last element is always the current
/// screen. Mutation goes through [`NavigationState::push`],
/// [`NavigationState::pop`] and [`NavigationState::reset`], each of which
/// preserves that shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    history: Vec<Screen>,
    pub drawer_open: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            history: vec![Screen::Entry],
            drawer_open: false,
        }
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Screen {
        // History always holds at least the entry screen.
        self.history.last().copied().unwrap_or(Screen::Entry)
    }

    pub fn history(&self) -> &[Screen] {
        &self.history
    }

    /// Appends `screen` unless it is already current. Returns whether the
    /// history changed.
    pub fn push(&mut self, screen: Screen) -> bool {
        if self.current() == screen {
            return false;
        }
        self.history.push(screen);
        true
    }

    /// Drops the current screen if there is one to go back to. Returns whether
    /// the history changed.
    pub fn pop(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        self.history.pop();
        true
    }

    /// Hard reset to the entry screen with the drawer closed.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_entry() {
        let state = NavigationState::new();
        assert_eq!(state.current(), Screen::Entry);
        assert_eq!(state.history(), &[Screen::Entry]);
        assert!(!state.drawer_open);
    }

    #[test]
    fn test_push_skips_self_transition() {
        let mut state = NavigationState::new();
        assert!(state.push(Screen::Auth));
        assert!(!state.push(Screen::Auth));
        assert_eq!(state.history(), &[Screen::Entry, Screen::Auth]);
    }

    #[test]
    fn test_pop_stops_at_floor() {
        let mut state = NavigationState::new();
        state.push(Screen::Auth);
        assert!(state.pop());
        assert!(!state.pop());
        assert_eq!(state.history(), &[Screen::Entry]);
    }
}
