//! HttpStudyBackend - REST implementation of the StudyMate collaborator.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use studymate_core::artifact::{HistoryEntry, QaAnswer, QuizAnswer, QuizResult, StudyArtifact};
use studymate_core::backend::{
    AuthGrant, Credentials, FederatedCredential, ProgressUpdate, Registration, StudyBackend,
    UploadRequest,
};
use studymate_core::config::ClientConfig;
use studymate_core::error::{Result, StudyMateError};

use crate::wire::{
    AskRequest, AskResponse, AuthResponse, ErrorBody, GoogleLoginRequest, HistoryRequest,
    HistoryResponse, ProgressRequest, ProgressResponse, QuizRequest, QuizResponse, UploadResponse,
};

/// How a non-2xx response is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    /// 4xx means the credentials were rejected.
    Auth,
    Data,
}

/// [`StudyBackend`] that talks to the StudyMate service over HTTP.
#[derive(Clone)]
pub struct HttpStudyBackend {
    client: Client,
    base_url: String,
}

impl HttpStudyBackend {
    /// Creates a backend for `base_url` with an optional per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| StudyMateError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let timeout = (config.request_timeout_secs > 0)
            .then(|| Duration::from_secs(config.request_timeout_secs));
        Self::new(config.api_base_url.clone(), timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends `request` and decodes a 2xx body as `T`.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: Endpoint,
        what: &str,
    ) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("[HttpBackend] {} request failed: {}", what, e);
            transport_error(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = ErrorBody::message_from(&raw);
            tracing::warn!(
                "[HttpBackend] {} returned {}: {}",
                what,
                status,
                message.as_deref().unwrap_or("<no error field>")
            );
            return Err(status_error(endpoint, status, message));
        }

        response.json::<T>().await.map_err(|e| {
            StudyMateError::network(format!("Failed to parse {} response: {}", what, e))
        })
    }
}

fn transport_error(err: reqwest::Error) -> StudyMateError {
    if err.is_timeout() {
        StudyMateError::network("request timed out")
    } else {
        StudyMateError::network(err.to_string())
    }
}

fn status_error(endpoint: Endpoint, status: StatusCode, message: Option<String>) -> StudyMateError {
    if endpoint == Endpoint::Auth && status.is_client_error() {
        StudyMateError::auth(message.unwrap_or_else(|| "Invalid credentials".to_string()))
    } else {
        StudyMateError::backend(status.as_u16(), message)
    }
}

#[async_trait]
impl StudyBackend for HttpStudyBackend {
    async fn upload(&self, request: &UploadRequest) -> Result<StudyArtifact> {
        let mime = mime_guess::from_path(&request.filename).first_or_octet_stream();
        let part = Part::bytes(request.bytes.clone())
            .file_name(request.filename.clone())
            .mime_str(mime.as_ref())
            .map_err(|e| StudyMateError::internal(format!("Invalid MIME type: {}", e)))?;
        let form = Form::new().part("file", part);

        tracing::debug!(
            "[HttpBackend] Uploading {} ({} bytes, {})",
            request.filename,
            request.bytes.len(),
            mime
        );

        let response: UploadResponse = self
            .send(
                self.client.post(self.url("/upload")).multipart(form),
                Endpoint::Data,
                "upload",
            )
            .await?;
        Ok(response.into_artifact(&request.filename))
    }

    async fn ask(&self, session_id: &str, question: &str) -> Result<QaAnswer> {
        let body = AskRequest {
            user_id: session_id,
            question,
        };
        let response: AskResponse = self
            .send(
                self.client.post(self.url("/qa")).json(&body),
                Endpoint::Data,
                "ask",
            )
            .await?;
        Ok(response.into_answer(question))
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant> {
        let response: AuthResponse = self
            .send(
                self.client.post(self.url("/login")).json(credentials),
                Endpoint::Auth,
                "login",
            )
            .await?;
        Ok(response.into())
    }

    async fn register(&self, registration: &Registration) -> Result<AuthGrant> {
        let response: AuthResponse = self
            .send(
                self.client.post(self.url("/register")).json(registration),
                Endpoint::Auth,
                "register",
            )
            .await?;
        Ok(response.into())
    }

    async fn google_login(&self, credential: &FederatedCredential) -> Result<AuthGrant> {
        let body = GoogleLoginRequest {
            credential: credential.as_str(),
        };
        let response: AuthResponse = self
            .send(
                self.client.post(self.url("/google-login")).json(&body),
                Endpoint::Auth,
                "google login",
            )
            .await?;
        Ok(response.into())
    }

    async fn update_progress(&self, update: ProgressUpdate<'_>) -> Result<f64> {
        let body = ProgressRequest {
            section_id: update.section_id,
            completed: update.completed,
        };
        let path = format!("/progress/{}", update.session_id);
        let response: ProgressResponse = self
            .send(
                self.client.post(self.url(&path)).json(&body),
                Endpoint::Data,
                "progress",
            )
            .await?;
        Ok(response.progress)
    }

    async fn submit_quiz(&self, session_id: &str, answers: &[QuizAnswer]) -> Result<QuizResult> {
        let body = QuizRequest {
            user_id: session_id,
            answers,
        };
        let response: QuizResponse = self
            .send(
                self.client.post(self.url("/quiz")).json(&body),
                Endpoint::Data,
                "quiz",
            )
            .await?;
        Ok(response.into())
    }

    async fn fetch_history(&self, owner_id: &str) -> Result<Vec<HistoryEntry>> {
        let body = HistoryRequest { user_id: owner_id };
        let response: HistoryResponse = self
            .send(
                self.client.post(self.url("/user/history")).json(&body),
                Endpoint::Data,
                "history",
            )
            .await?;
        Ok(response.into_entries())
    }

    async fn health(&self) -> Result<()> {
        let _: serde_json::Value = self
            .send(
                self.client.get(self.url("/health")),
                Endpoint::Data,
                "health",
            )
            .await?;
        Ok(())
    }
}
