//! Error types for the StudyMate client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown when a request fails without a server-supplied explanation.
pub const GENERIC_NETWORK_FAILURE: &str = "Network error: could not reach the StudyMate service";

/// A shared error type for the entire StudyMate client.
///
/// Variants mirror the failure taxonomy the stores react to: validation errors
/// never leave the client, authentication and backend errors carry the
/// collaborator's message, network errors are transport failures, and stale
/// completions are dropped without ever reaching the user.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StudyMateError {
    /// Input rejected before dispatch (empty file, empty question, bad credentials).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The collaborator rejected the supplied credentials.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Transport failure: connection refused, timeout, unreadable body.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response, optionally carrying an application-level `error` field.
    #[error("Backend error ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Backend {
        status: u16,
        message: Option<String>,
    },

    /// An action of the same kind is already in flight; the trigger was ignored.
    #[error("{kind} is already in progress")]
    ActionPending { kind: String },

    /// A completion arrived after the state it targeted was superseded.
    #[error("Stale completion for {kind}")]
    StaleCompletion { kind: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Durable client storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StudyMateError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn backend(status: u16, message: Option<String>) -> Self {
        Self::Backend { status, message }
    }

    pub fn pending(kind: impl Into<String>) -> Self {
        Self::ActionPending { kind: kind.into() }
    }

    pub fn stale(kind: impl Into<String>) -> Self {
        Self::StaleCompletion { kind: kind.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleCompletion { .. })
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::ActionPending { .. })
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Text for the error notification raised when an action fails.
    ///
    /// Prefers the server-supplied message; transport failures and bare
    /// non-2xx responses fall back to [`GENERIC_NETWORK_FAILURE`].
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) | Self::Auth(message) => message.clone(),
            Self::Backend {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::Backend { .. } | Self::Network(_) => GENERIC_NETWORK_FAILURE.to_string(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for StudyMateError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for StudyMateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for StudyMateError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for StudyMateError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, StudyMateError>`.
pub type Result<T> = std::result::Result<T, StudyMateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = StudyMateError::backend(500, Some("server error".to_string()));
        assert_eq!(err.user_message(), "server error");
    }

    #[test]
    fn test_user_message_falls_back_to_generic() {
        let blank = StudyMateError::backend(502, Some("   ".to_string()));
        assert_eq!(blank.user_message(), GENERIC_NETWORK_FAILURE);

        let missing = StudyMateError::backend(404, None);
        assert_eq!(missing.user_message(), GENERIC_NETWORK_FAILURE);

        let transport = StudyMateError::network("connection refused");
        assert_eq!(transport.user_message(), GENERIC_NETWORK_FAILURE);
    }

    #[test]
    fn test_auth_message_passes_through() {
        let err = StudyMateError::auth("Invalid credentials");
        assert!(err.is_auth());
        assert_eq!(err.user_message(), "Invalid credentials");
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: StudyMateError = io.into();
        assert!(err.to_string().contains("NotFound"));
    }
}
