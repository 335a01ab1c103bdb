//! Unified path management for StudyMate files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/studymate/         # Config directory
//! ├── config.toml              # Client configuration
//! ├── storage.toml             # Durable client storage (session, theme)
//! └── logs/                    # Application logs
//!     └── studymate.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "studymate";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for studymate_core::StudyMateError {
    fn from(err: PathError) -> Self {
        studymate_core::StudyMateError::config(err.to_string())
    }
}

/// Resolves StudyMate file locations.
///
/// With a base override every path lives directly under that directory, which
/// is how tests and `--config-dir` runs keep away from the user's real files.
#[derive(Debug, Clone, Default)]
pub struct StudyMatePaths {
    base_override: Option<PathBuf>,
}

impl StudyMatePaths {
    pub fn new(base_override: Option<PathBuf>) -> Self {
        Self { base_override }
    }

    /// Returns the StudyMate configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/studymate/`
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_override {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn storage_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("storage.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_roots_every_path() {
        let base = PathBuf::from("/tmp/studymate-test");
        let paths = StudyMatePaths::new(Some(base.clone()));

        assert_eq!(paths.config_dir().unwrap(), base);
        assert!(paths.config_file().unwrap().ends_with("config.toml"));
        assert!(paths.storage_file().unwrap().starts_with(&base));
        assert!(paths.logs_dir().unwrap().ends_with("logs"));
    }
}
