//! SessionStore - who is signed in, backed by durable client storage.

use std::sync::Arc;

use studymate_core::session::{PersistedSession, Session};
use studymate_core::storage::{ClientStorage, SESSION_KEY};

/// Holds the current [`Session`] and mirrors it to [`ClientStorage`].
///
/// The session generation moves on [`SessionStore::clear`] and when
/// [`SessionStore::establish`] replaces one signed-in user with another;
/// completions tagged with an older generation belong to a previous user.
pub struct SessionStore {
    storage: Arc<dyn ClientStorage>,
    session: Session,
    generation: u64,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        Self {
            storage,
            session: Session::anonymous(),
            generation: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Reads the persisted session.
    ///
    /// A malformed record is treated as absent and removed.
    pub fn cached_session(&self) -> Option<Session> {
        let raw = match self.storage.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("[SessionStore] Failed to read cached session: {}", e);
                return None;
            }
        };

        match PersistedSession::parse(&raw) {
            Some(record) => Some(record.into_session()),
            None => {
                tracing::warn!("[SessionStore] Discarding malformed cached session");
                self.forget();
                None
            }
        }
    }

    /// Makes `session` current and persists it.
    ///
    /// Returns `true` when a different signed-in user was replaced, in which
    /// case the generation has moved. A storage failure is logged; the
    /// in-memory session is still updated.
    pub fn establish(&mut self, session: Session) -> bool {
        let switched = self.session.is_authenticated()
            && self.session.user_id() != session.user_id();
        if switched {
            tracing::info!(
                "[SessionStore] Replacing signed-in user {}",
                self.session.user_id().unwrap_or("<anonymous>")
            );
            self.generation += 1;
        }
        if let Some(record) = session.to_persisted() {
            let written = record
                .to_json()
                .map_err(Into::into)
                .and_then(|json| self.storage.set(SESSION_KEY, &json));
            if let Err(e) = written {
                tracing::warn!("[SessionStore] Failed to persist session: {}", e);
            }
        }
        tracing::info!(
            "[SessionStore] Signed in as {}",
            session.user_id().unwrap_or("<anonymous>")
        );
        self.session = session;
        switched
    }

    /// Makes a session read back from storage current without rewriting it.
    pub fn adopt(&mut self, session: Session) {
        tracing::info!(
            "[SessionStore] Restored session for {}",
            session.user_id().unwrap_or("<anonymous>")
        );
        self.session = session;
    }

    /// Signs out: anonymous session, persisted record removed, generation bumped.
    pub fn clear(&mut self) {
        self.forget();
        self.session = Session::anonymous();
        self.generation += 1;
    }

    /// Removes the persisted record without touching memory.
    pub fn forget(&self) {
        if let Err(e) = self.storage.remove(SESSION_KEY) {
            tracing::warn!("[SessionStore] Failed to remove cached session: {}", e);
        }
    }
}
