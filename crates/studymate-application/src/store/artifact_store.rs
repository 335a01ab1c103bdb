//! StudyArtifactStore - everything derived from the current upload.

use studymate_core::artifact::{
    HistoryEntry, QaAnswer, QuestionKey, QuizResult, QuizSubmission, SectionId, StudyArtifact,
};

/// Study artifact, quiz state, last answer and history log.
///
/// The artifact generation moves whenever the artifact is replaced or
/// cleared, which invalidates any in-flight action that targeted it.
#[derive(Debug, Default)]
pub struct StudyArtifactStore {
    artifact: Option<StudyArtifact>,
    quiz_submission: QuizSubmission,
    quiz_result: Option<QuizResult>,
    last_answer: Option<QaAnswer>,
    history_log: Vec<HistoryEntry>,
    generation: u64,
}

impl StudyArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifact(&self) -> Option<&StudyArtifact> {
        self.artifact.as_ref()
    }

    pub fn has_artifact(&self) -> bool {
        self.artifact.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Installs a freshly uploaded artifact.
    ///
    /// Results derived from the previous artifact are dropped. The quiz
    /// submission is the user's own input and is kept.
    pub fn replace(&mut self, artifact: StudyArtifact) {
        tracing::info!(
            "[ArtifactStore] Loaded {} ({} sections)",
            artifact.filename,
            artifact.study_plan.sections.len()
        );
        self.artifact = Some(artifact);
        self.quiz_result = None;
        self.last_answer = None;
        self.generation += 1;
    }

    /// Applies a server-confirmed progress value. Returns `false` when there
    /// is no artifact or no such section.
    pub fn apply_progress(
        &mut self,
        section_id: SectionId,
        completed: bool,
        overall_progress_percent: f64,
    ) -> bool {
        self.artifact
            .as_mut()
            .is_some_and(|a| a.apply_progress(section_id, completed, overall_progress_percent))
    }

    pub fn last_answer(&self) -> Option<&QaAnswer> {
        self.last_answer.as_ref()
    }

    pub fn set_last_answer(&mut self, answer: QaAnswer) {
        self.last_answer = Some(answer);
    }

    pub fn quiz_submission(&self) -> &QuizSubmission {
        &self.quiz_submission
    }

    pub fn set_quiz_answer(&mut self, key: QuestionKey, answer: impl Into<String>) {
        self.quiz_submission.set(key, answer);
    }

    pub fn clear_quiz_answers(&mut self) {
        self.quiz_submission.clear();
    }

    pub fn quiz_result(&self) -> Option<&QuizResult> {
        self.quiz_result.as_ref()
    }

    pub fn set_quiz_result(&mut self, result: QuizResult) {
        self.quiz_result = Some(result);
    }

    pub fn history_log(&self) -> &[HistoryEntry] {
        &self.history_log
    }

    pub fn set_history_log(&mut self, entries: Vec<HistoryEntry>) {
        self.history_log = entries;
    }

    /// Drops the artifact and everything derived from it. The history log
    /// belongs to the user and survives.
    pub fn clear_study(&mut self) {
        self.artifact = None;
        self.quiz_submission.clear();
        self.quiz_result = None;
        self.last_answer = None;
        self.generation += 1;
    }

    /// [`Self::clear_study`] plus the history log.
    pub fn clear_all(&mut self) {
        self.clear_study();
        self.history_log.clear();
    }
}
