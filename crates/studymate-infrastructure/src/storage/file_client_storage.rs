//! File-backed durable client storage.

use std::collections::BTreeMap;
use std::path::PathBuf;

use studymate_core::error::Result;
use studymate_core::storage::ClientStorage;

use super::atomic_toml::AtomicTomlFile;
use crate::paths::StudyMatePaths;

type Entries = BTreeMap<String, String>;

/// [`ClientStorage`] persisted as a flat string table in `storage.toml`.
///
/// Every write is a locked read-modify-write of the whole file, so the file
/// always reflects the last completed `set`/`remove`.
#[derive(Debug, Clone)]
pub struct FileClientStorage {
    file: AtomicTomlFile<Entries>,
}

impl FileClientStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    /// Storage at the default location resolved by `paths`.
    pub fn from_paths(paths: &StudyMatePaths) -> Result<Self> {
        let path = paths.storage_file()?;
        tracing::debug!("[FileClientStorage] Using {:?}", path);
        Ok(Self::new(path))
    }
}

impl ClientStorage for FileClientStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .file
            .load()?
            .and_then(|mut entries| entries.remove(key)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.file.update(Entries::new(), |entries| {
            entries.insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        if !self.file.path().exists() {
            return Ok(());
        }
        self.file.update(Entries::new(), |entries| {
            entries.remove(key);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileClientStorage::new(temp_dir.path().join("storage.toml"));

        assert_eq!(storage.get("studymate_user").unwrap(), None);

        storage
            .set("studymate_user", r#"{"userId":"u-1"}"#)
            .unwrap();
        storage.set("studymate_darkmode", "true").unwrap();
        assert_eq!(
            storage.get("studymate_user").unwrap().as_deref(),
            Some(r#"{"userId":"u-1"}"#)
        );

        storage.remove("studymate_user").unwrap();
        assert_eq!(storage.get("studymate_user").unwrap(), None);
        assert_eq!(storage.get("studymate_darkmode").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_values_survive_a_new_handle() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.toml");

        FileClientStorage::new(path.clone())
            .set("studymate_darkmode", "false")
            .unwrap();

        let reopened = FileClientStorage::new(path);
        assert_eq!(
            reopened.get("studymate_darkmode").unwrap().as_deref(),
            Some("false")
        );
    }

    #[test]
    fn test_corrupt_file_recovers_on_next_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.toml");
        std::fs::write(&path, "studymate_user = {broken").unwrap();
        let storage = FileClientStorage::new(path);

        storage
            .set("studymate_user", r#"{"userId":"u-1"}"#)
            .unwrap();
        storage.set("studymate_darkmode", "true").unwrap();

        assert_eq!(
            storage.get("studymate_user").unwrap().as_deref(),
            Some(r#"{"userId":"u-1"}"#)
        );
        storage.remove("studymate_user").unwrap();
        assert_eq!(storage.get("studymate_user").unwrap(), None);
    }

    #[test]
    fn test_remove_without_file_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.toml");
        let storage = FileClientStorage::new(path.clone());

        storage.remove("studymate_user").unwrap();
        assert!(!path.exists());
    }
}
