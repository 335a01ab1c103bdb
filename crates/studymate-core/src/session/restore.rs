//! Restore policy capability.
//!
//! At startup the client finds a cached session in durable storage. Whether
//! that cached session is admitted as-is or first confirmed with the
//! collaborator is a policy decision, kept behind this trait so the rest of
//! the state machine does not change when the policy does.

use super::model::Session;

/// Decides whether a session read from durable storage may be used.
#[async_trait::async_trait]
pub trait RestorePolicy: Send + Sync {
    /// Returns `true` if `cached` should become the active session.
    async fn admit(&self, cached: &Session) -> bool;
}

/// Admits every well-formed cached session without a network round trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustCachedSession;

#[async_trait::async_trait]
impl RestorePolicy for TrustCachedSession {
    async fn admit(&self, _cached: &Session) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trust_cached_session_admits() {
        let session = Session::authenticated("u-1", "Ada", "ada@example.com");
        assert!(TrustCachedSession.admit(&session).await);
    }
}
