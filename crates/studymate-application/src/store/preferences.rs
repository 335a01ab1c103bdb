//! Display preferences persisted in client storage.

use std::sync::Arc;

use studymate_core::storage::{ClientStorage, DARK_MODE_KEY};

/// Display preferences persisted alongside the session.
pub struct Preferences {
    storage: Arc<dyn ClientStorage>,
    dark_mode: bool,
}

impl Preferences {
    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        Self {
            storage,
            dark_mode: false,
        }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Loads the stored preference. Missing or unreadable values mean light mode.
    pub fn load(&mut self) {
        self.dark_mode = match self.storage.get(DARK_MODE_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<bool>(&raw).unwrap_or(false),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("[Preferences] Failed to read theme: {}", e);
                false
            }
        };
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.dark_mode = enabled;
        let raw = if enabled { "true" } else { "false" };
        if let Err(e) = self.storage.set(DARK_MODE_KEY, raw) {
            tracing::warn!("[Preferences] Failed to persist theme: {}", e);
        }
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.set_dark_mode(!self.dark_mode);
        self.dark_mode
    }
}
