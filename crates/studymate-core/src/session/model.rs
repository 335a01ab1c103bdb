//! Session domain model.
//!
//! Represents the authenticated-user identity held by the client, and the
//! record persisted to durable client storage.

use serde::{Deserialize, Serialize};

/// The signed-in user as seen by the client.
///
/// `authenticated` is true exactly when `user_id` is present. The fields are
/// private so the only ways to obtain a `Session` are [`Session::anonymous`]
/// and [`Session::authenticated`], both of which uphold that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    user_id: Option<String>,
    display_name: String,
    email: String,
    authenticated: bool,
}

impl Session {
    /// The logged-out session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A fully populated, authenticated session.
    pub fn authenticated(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            user_id: Some(user_id.into()),
            display_name: display_name.into(),
            email: email.into(),
            authenticated: true,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Converts into the durable record, or `None` for the anonymous session.
    pub fn to_persisted(&self) -> Option<PersistedSession> {
        self.user_id.as_ref().map(|user_id| PersistedSession {
            user_id: user_id.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
        })
    }
}

/// The session record kept in durable client storage under
/// [`crate::storage::SESSION_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
}

impl PersistedSession {
    /// Parses a stored record.
    ///
    /// Anything malformed, including a record with a blank user id, yields
    /// `None` so the caller falls back to the logged-out state.
    pub fn parse(raw: &str) -> Option<Self> {
        let record: Self = serde_json::from_str(raw).ok()?;
        if record.user_id.trim().is_empty() {
            return None;
        }
        Some(record)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn into_session(self) -> Session {
        Session::authenticated(self.user_id, self.display_name, self.email)
    }
}
