use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use studymate_core::error::{Result, StudyMateError};
use studymate_core::storage::ClientStorage;

/// In-process [`ClientStorage`], used by tests and ephemeral runs.
///
/// Clones share the same underlying map, so a test can keep a handle and
/// inspect what the stores persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryClientStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryClientStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut entries) = storage.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
        storage
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }
}

fn poisoned() -> StudyMateError {
    StudyMateError::storage("memory storage lock poisoned")
}

impl ClientStorage for MemoryClientStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let storage = MemoryClientStorage::new();
        let observer = storage.clone();

        storage.set("k", "v").unwrap();
        assert!(observer.contains_key("k"));

        storage.remove("k").unwrap();
        assert!(!observer.contains_key("k"));
    }
}
