//! Restore policies that need a collaborator.

use std::sync::Arc;

use async_trait::async_trait;
use studymate_core::backend::StudyBackend;
use studymate_core::session::{RestorePolicy, Session};

/// Admits a cached session only if the collaborator still answers for its
/// user id.
///
/// The history endpoint is used as the probe since it is keyed by user id
/// and has no side effects.
pub struct RevalidateWithBackend {
    backend: Arc<dyn StudyBackend>,
}

impl RevalidateWithBackend {
    pub fn new(backend: Arc<dyn StudyBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl RestorePolicy for RevalidateWithBackend {
    async fn admit(&self, cached: &Session) -> bool {
        let Some(user_id) = cached.user_id() else {
            return false;
        };
        match self.backend.fetch_history(user_id).await {
            Ok(_) => true,
            Err(e) => {
                tracing::info!(
                    "[Restore] Cached session for {} not confirmed: {}",
                    user_id,
                    e
                );
                false
            }
        }
    }
}
