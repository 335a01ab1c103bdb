use serde::Serialize;
use studymate_core::action::AsyncAction;
use studymate_core::artifact::{HistoryEntry, QaAnswer, QuizAnswer, QuizResult, StudyArtifact};
use studymate_core::navigation::NavigationState;
use studymate_core::notification::Notification;
use studymate_core::session::Session;

/// Owned, read-only copy of every store, taken under one lock.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSnapshot {
    pub session: Session,
    pub navigation: NavigationState,
    pub actions: Vec<AsyncAction>,
    pub artifact: Option<StudyArtifact>,
    /// Quiz answers entered so far, in `(section_id, question_index)` order.
    pub quiz_submission: Vec<QuizAnswer>,
    pub quiz_result: Option<QuizResult>,
    pub last_answer: Option<QaAnswer>,
    pub history_log: Vec<HistoryEntry>,
    pub notification: Option<Notification>,
    pub dark_mode: bool,
}

impl AppSnapshot {
    pub fn has_artifact(&self) -> bool {
        self.artifact.is_some()
    }
}
