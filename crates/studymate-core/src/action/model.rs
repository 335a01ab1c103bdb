//! Network-backed action types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Every user action that needs a round trip to the collaborator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Upload,
    Ask,
    Login,
    Register,
    GoogleLogin,
    UpdateProgress,
    SubmitQuiz,
    FetchHistory,
}

impl ActionKind {
    /// Upload and the auth actions only depend on who is signed in; the rest
    /// also depend on the current artifact.
    pub fn is_session_scoped(self) -> bool {
        matches!(
            self,
            ActionKind::Upload | ActionKind::Login | ActionKind::Register | ActionKind::GoogleLogin
        )
    }

    /// Failures of this kind are logged but never surfaced to the user.
    pub fn is_silent_on_failure(self) -> bool {
        matches!(self, ActionKind::FetchHistory)
    }
}

/// Lifecycle of a single action kind: idle → pending → succeeded | failed → idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Observable status of one action kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AsyncAction {
    pub kind: ActionKind,
    pub state: ActionState,
    pub error: Option<String>,
}

impl AsyncAction {
    pub fn idle(kind: ActionKind) -> Self {
        Self {
            kind,
            state: ActionState::Idle,
            error: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == ActionState::Pending
    }
}

/// The session and artifact versions an in-flight action was issued against.
///
/// Each counter is bumped whenever the corresponding state is replaced or
/// cleared; a completion whose tag no longer matches is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Generation {
    pub session: u64,
    pub artifact: u64,
}

impl Generation {
    /// Whether a completion of `kind` issued at `self` still applies at `current`.
    ///
    /// Session-scoped kinds only need the session to match; everything else
    /// reads or mutates the artifact and needs both to match.
    pub fn is_current_for(&self, kind: ActionKind, current: Generation) -> bool {
        if kind.is_session_scoped() {
            self.session == current.session
        } else {
            *self == current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_ignores_artifact_generation() {
        let issued = Generation { session: 1, artifact: 3 };
        let now = Generation { session: 1, artifact: 4 };
        assert!(issued.is_current_for(ActionKind::Upload, now));
        assert!(!issued.is_current_for(ActionKind::UpdateProgress, now));
    }

    #[test]
    fn test_session_scoped_kinds() {
        assert!(ActionKind::Upload.is_session_scoped());
        assert!(ActionKind::GoogleLogin.is_session_scoped());
        assert!(!ActionKind::Ask.is_session_scoped());
        assert!(!ActionKind::FetchHistory.is_session_scoped());
    }

    #[test]
    fn test_logout_invalidates_everything() {
        let issued = Generation { session: 1, artifact: 3 };
        let now = Generation { session: 2, artifact: 3 };
        assert!(!issued.is_current_for(ActionKind::Login, now));
        assert!(!issued.is_current_for(ActionKind::Ask, now));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ActionKind::GoogleLogin.to_string(), "google_login");
        assert_eq!(ActionState::Pending.to_string(), "pending");
    }
}
