//! Collaborator interface.
//!
//! The StudyMate service performs document understanding, question answering
//! and quiz grading. The client only knows the request and response shapes
//! defined here; any transport can implement [`StudyBackend`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::artifact::{HistoryEntry, QaAnswer, QuizAnswer, QuizResult, SectionId, StudyArtifact};
use crate::error::Result;

/// A document selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadRequest {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

impl fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadRequest")
            .field("filename", &self.filename)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Email and password. `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// New account details.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An opaque bearer token from a federated identity provider.
///
/// Forwarded to the collaborator verbatim; the client never decodes it.
#[derive(Clone, PartialEq, Eq)]
pub struct FederatedCredential(String);

impl FederatedCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for FederatedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FederatedCredential(<opaque>)")
    }
}

/// Identity returned by a successful login, registration or federated login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthGrant {
    pub user_id: String,
    pub name: String,
    /// Present for federated logins, where the client did not know it.
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate<'a> {
    pub session_id: &'a str,
    pub section_id: SectionId,
    pub completed: bool,
}

/// The authoritative collaborator behind every network-backed action.
#[async_trait::async_trait]
pub trait StudyBackend: Send + Sync {
    async fn upload(&self, request: &UploadRequest) -> Result<StudyArtifact>;

    async fn ask(&self, session_id: &str, question: &str) -> Result<QaAnswer>;

    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant>;

    async fn register(&self, registration: &Registration) -> Result<AuthGrant>;

    async fn google_login(&self, credential: &FederatedCredential) -> Result<AuthGrant>;

    /// Returns the overall progress percentage after the update.
    async fn update_progress(&self, update: ProgressUpdate<'_>) -> Result<f64>;

    async fn submit_quiz(&self, session_id: &str, answers: &[QuizAnswer]) -> Result<QuizResult>;

    async fn fetch_history(&self, owner_id: &str) -> Result<Vec<HistoryEntry>>;

    /// Liveness probe; not an action and never touches client state.
    async fn health(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_hides_secrets() {
        let credentials = Credentials::new("ada@example.com", "hunter2");
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("ada@example.com"));
        assert!(!printed.contains("hunter2"));

        let token = FederatedCredential::new("eyJhbGciOi");
        assert!(!format!("{:?}", token).contains("eyJ"));

        let upload = UploadRequest::new("notes.pdf", vec![1, 2, 3]);
        assert!(format!("{:?}", upload).contains("len: 3"));
    }
}
