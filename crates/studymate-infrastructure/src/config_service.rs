//! Configuration service implementation.
//!
//! Loads `ClientConfig` from `config.toml`, creating the file with defaults
//! when it is missing, and applies environment overrides on top.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use studymate_core::config::ClientConfig;
use studymate_core::error::{Result, StudyMateError};

use crate::paths::StudyMatePaths;
use crate::storage::AtomicTomlFile;

pub const ENV_API_URL: &str = "STUDYMATE_API_URL";
pub const ENV_LOG_LEVEL: &str = "STUDYMATE_LOG_LEVEL";

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    file: AtomicTomlFile<ClientConfig>,
    /// Cached configuration; `None` until first access.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn from_paths(paths: &StudyMatePaths) -> Result<Self> {
        Ok(Self::new(paths.config_file()?))
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|_| StudyMateError::internal("config cache lock poisoned"))?;
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let loaded = apply_env_overrides(self.load_or_create()?, |key| std::env::var(key).ok());

        let mut write_lock = self
            .config
            .write()
            .map_err(|_| StudyMateError::internal("config cache lock poisoned"))?;
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    fn load_or_create(&self) -> Result<ClientConfig> {
        match self.file.load()? {
            Some(config) => Ok(config),
            None => {
                let config = ClientConfig::default();
                tracing::info!(
                    "[ConfigService] Writing default configuration to {:?}",
                    self.file.path()
                );
                self.file.save(&config)?;
                Ok(config)
            }
        }
    }
}

/// Applies `STUDYMATE_*` overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(mut config: ClientConfig, lookup: F) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        config.api_base_url = url;
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
        config.log_level = level;
    }
    config
}
