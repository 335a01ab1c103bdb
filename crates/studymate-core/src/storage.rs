//! Durable client storage interface.
//!
//! A small string key-value store read once at startup and overwritten on
//! every change. Writes are last-writer-wins; there is a single writer.

use crate::error::Result;

/// Key holding the persisted [`crate::session::PersistedSession`] as JSON.
pub const SESSION_KEY: &str = "studymate_user";

/// Key holding the dark-mode preference as a JSON boolean.
pub const DARK_MODE_KEY: &str = "studymate_darkmode";

pub trait ClientStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
