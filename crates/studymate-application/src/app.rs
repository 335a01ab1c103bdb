//! StudyMateApp - the client state machine behind every screen.
//!
//! All stores sit behind one lock. Network-backed actions follow the same
//! envelope: validate and mark pending under the lock, release it for the
//! collaborator call, then re-acquire it to settle. A completion whose
//! generation tag no longer matches is discarded without touching any store.

use std::sync::Arc;

use strum::IntoEnumIterator;
use studymate_core::action::{ActionKind, AsyncAction, Generation};
use studymate_core::artifact::{
    HistoryEntry, QaAnswer, QuestionKey, QuizResult, SectionId, StudyArtifact,
};
use studymate_core::backend::{
    AuthGrant, Credentials, FederatedCredential, ProgressUpdate, Registration, StudyBackend,
    UploadRequest,
};
use studymate_core::config::PolicyConfig;
use studymate_core::error::{Result, StudyMateError};
use studymate_core::navigation::Screen;
use studymate_core::session::{RestorePolicy, Session, TrustCachedSession};
use studymate_core::storage::ClientStorage;
use tokio::sync::Mutex;

use crate::restore::RevalidateWithBackend;
use crate::snapshot::AppSnapshot;
use crate::store::{
    ActionTicket, AsyncActionRunner, NavigationController, NavigationOutcome, NotificationCenter,
    Preferences, SessionStore, StudyArtifactStore, UPLOAD_REQUIRED_MESSAGE,
};
use crate::validation;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded successfully!";
pub const ANSWER_SUCCESS_MESSAGE: &str = "Answer generated successfully!";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful!";
pub const GOOGLE_LOGIN_SUCCESS_MESSAGE: &str = "Google login successful!";
pub const REGISTER_SUCCESS_MESSAGE: &str = "Registration successful!";
pub const LOGOUT_MESSAGE: &str = "Logged out successfully";
pub const PROGRESS_SUCCESS_MESSAGE: &str = "Progress updated";

struct ClientState {
    session: SessionStore,
    navigation: NavigationController,
    actions: AsyncActionRunner,
    artifacts: StudyArtifactStore,
    notifications: NotificationCenter,
    preferences: Preferences,
}

impl ClientState {
    fn generation(&self) -> Generation {
        Generation {
            session: self.session.generation(),
            artifact: self.artifacts.generation(),
        }
    }

    fn go_to(&mut self, screen: Screen) -> NavigationOutcome {
        self.navigation
            .go_to(screen, self.artifacts.has_artifact(), &mut self.notifications)
    }

    /// Refuses a duplicate trigger, runs `check`, then marks `kind` pending.
    ///
    /// A validation failure raises a warning unless the kind is silent.
    fn begin(&mut self, kind: ActionKind, check: Result<()>) -> Result<ActionTicket> {
        if self.actions.is_pending(kind) {
            return Err(StudyMateError::pending(kind.to_string()));
        }
        if let Err(e) = check {
            tracing::debug!("[StudyMateApp] {} rejected before dispatch: {}", kind, e);
            if !kind.is_silent_on_failure() {
                self.notifications.warning(e.user_message());
            }
            return Err(e);
        }
        self.actions.begin(kind, self.generation())
    }

    /// Decides what a finished call means for the stores.
    ///
    /// Stale completions are discarded; failures mark the slot failed and
    /// raise an error notification. `Ok` hands the value back to the caller,
    /// which applies it and calls [`AsyncActionRunner::succeed`].
    fn settle<T>(&mut self, ticket: ActionTicket, outcome: Result<T>) -> Result<T> {
        if !ticket.is_current(self.generation()) {
            return Err(self.actions.discard(ticket));
        }
        outcome.map_err(|e| {
            self.actions.fail(ticket, &e);
            if ticket.kind.is_silent_on_failure() {
                tracing::debug!("[StudyMateApp] {} failed silently: {}", ticket.kind, e);
            } else {
                tracing::warn!("[StudyMateApp] {} failed: {}", ticket.kind, e);
                self.notifications.error(e.user_message());
            }
            e
        })
    }

    /// Makes `session` current. Replacing a different signed-in user drops
    /// the previous user's study data and outstanding results.
    fn sign_in(&mut self, session: Session) {
        if self.session.establish(session) {
            self.artifacts.clear_all();
            self.navigation.set_drawer(false);
        }
    }

    fn require_artifact(&self) -> Result<&StudyArtifact> {
        self.artifacts
            .artifact()
            .ok_or_else(|| StudyMateError::validation(UPLOAD_REQUIRED_MESSAGE))
    }

    fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            session: self.session.session().clone(),
            navigation: self.navigation.state().clone(),
            actions: self.actions.all(),
            artifact: self.artifacts.artifact().cloned(),
            quiz_submission: self.artifacts.quiz_submission().to_answers(),
            quiz_result: self.artifacts.quiz_result().cloned(),
            last_answer: self.artifacts.last_answer().cloned(),
            history_log: self.artifacts.history_log().to_vec(),
            notification: self.notifications.current().cloned(),
            dark_mode: self.preferences.dark_mode(),
        }
    }
}

/// The StudyMate client: session, navigation, actions, artifacts and
/// notifications, mutated only through the operations below.
///
/// Every operation that calls the collaborator is `async` and may be driven
/// concurrently with others; at most one call per [`ActionKind`] is in flight.
pub struct StudyMateApp {
    backend: Arc<dyn StudyBackend>,
    policy: PolicyConfig,
    restore_policy: Arc<dyn RestorePolicy>,
    state: Mutex<ClientState>,
}

impl StudyMateApp {
    /// Creates an app over `backend` and `storage`.
    ///
    /// The restore policy follows `policy.revalidate_restored_session`; use
    /// [`Self::with_restore_policy`] to supply another.
    pub fn new(
        backend: Arc<dyn StudyBackend>,
        storage: Arc<dyn ClientStorage>,
        policy: PolicyConfig,
    ) -> Self {
        let restore_policy: Arc<dyn RestorePolicy> = if policy.revalidate_restored_session {
            Arc::new(RevalidateWithBackend::new(backend.clone()))
        } else {
            Arc::new(TrustCachedSession)
        };

        Self {
            backend,
            policy,
            restore_policy,
            state: Mutex::new(ClientState {
                session: SessionStore::new(storage.clone()),
                navigation: NavigationController::new(),
                actions: AsyncActionRunner::new(),
                artifacts: StudyArtifactStore::new(),
                notifications: NotificationCenter::new(),
                preferences: Preferences::new(storage),
            }),
        }
    }

    pub fn with_restore_policy(mut self, restore_policy: Arc<dyn RestorePolicy>) -> Self {
        self.restore_policy = restore_policy;
        self
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    // ============================================================================
    // Session
    // ============================================================================

    /// Loads the theme and any persisted session.
    ///
    /// An admitted session lands on the dashboard. A rejected one is removed
    /// from storage. Malformed records count as no session.
    pub async fn restore(&self) -> Option<Session> {
        let (cached, issued_at) = {
            let mut state = self.state.lock().await;
            state.preferences.load();
            (state.session.cached_session()?, state.session.generation())
        };

        let admitted = self.restore_policy.admit(&cached).await;

        let mut state = self.state.lock().await;
        if state.session.generation() != issued_at || state.session.session().is_authenticated() {
            tracing::debug!("[StudyMateApp] Session changed during restore; keeping current");
            return None;
        }
        if !admitted {
            state.session.forget();
            return None;
        }

        state.session.adopt(cached.clone());
        state.go_to(Screen::Dashboard);
        Some(cached)
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// - `Validation` for a malformed email or empty password
    /// - `Auth` when the collaborator rejects the credentials
    /// - `ActionPending` when a login is already in flight
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let credentials = Credentials::new(email.trim(), password);
        let ticket = {
            let mut state = self.state.lock().await;
            state.begin(
                ActionKind::Login,
                validation::validate_credentials(&credentials),
            )?
        };

        let outcome = self.backend.login(&credentials).await;

        let mut state = self.state.lock().await;
        let grant = state.settle(ticket, outcome)?;
        let session = session_from_grant(grant, &credentials.email);
        state.sign_in(session.clone());
        state.actions.succeed(ticket);
        state.notifications.success(LOGIN_SUCCESS_MESSAGE);
        state.go_to(Screen::Dashboard);
        Ok(session)
    }

    /// Creates an account.
    ///
    /// With `registration_signs_in` the new account becomes the current
    /// session and the dashboard opens; otherwise the auth screen opens and
    /// the returned session is not adopted.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<Session> {
        let registration = Registration {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let ticket = {
            let mut state = self.state.lock().await;
            state.begin(
                ActionKind::Register,
                validation::validate_registration(&registration),
            )?
        };

        let outcome = self.backend.register(&registration).await;

        let mut state = self.state.lock().await;
        let grant = state.settle(ticket, outcome)?;
        let mut session = session_from_grant(grant, &registration.email);
        if session.display_name().is_empty() {
            session = Session::authenticated(
                session.user_id().unwrap_or_default(),
                registration.name.clone(),
                session.email(),
            );
        }
        state.actions.succeed(ticket);
        state.notifications.success(REGISTER_SUCCESS_MESSAGE);
        if self.policy.registration_signs_in {
            state.sign_in(session.clone());
            state.go_to(Screen::Dashboard);
        } else {
            state.go_to(Screen::Auth);
        }
        Ok(session)
    }

    /// Signs in with an opaque credential from the federated identity
    /// provider. The credential is forwarded as-is.
    pub async fn login_with_federated_credential(
        &self,
        credential: FederatedCredential,
    ) -> Result<Session> {
        let ticket = {
            let mut state = self.state.lock().await;
            state.begin(
                ActionKind::GoogleLogin,
                validation::validate_federated(&credential),
            )?
        };

        let outcome = self.backend.google_login(&credential).await;

        let mut state = self.state.lock().await;
        let grant = state.settle(ticket, outcome)?;
        let session = session_from_grant(grant, "");
        state.sign_in(session.clone());
        state.actions.succeed(ticket);
        state.notifications.success(GOOGLE_LOGIN_SUCCESS_MESSAGE);
        state.go_to(Screen::Dashboard);
        if self.policy.google_login_opens_drawer {
            state.navigation.set_drawer(true);
        }
        Ok(session)
    }

    /// Signs out and resets every store to its initial state.
    ///
    /// In-flight actions are not cancelled; their completions arrive stale
    /// and are dropped.
    pub async fn logout(&self) {
        let mut state = self.state.lock().await;
        state.session.clear();
        state.artifacts.clear_all();
        state.navigation.reset();
        for kind in ActionKind::iter() {
            state.actions.acknowledge(kind);
        }
        state.notifications.info(LOGOUT_MESSAGE);
        tracing::info!("[StudyMateApp] Logged out");
    }

    pub async fn session(&self) -> Session {
        self.state.lock().await.session.session().clone()
    }

    // ============================================================================
    // Navigation
    // ============================================================================

    pub async fn go_to(&self, screen: Screen) -> NavigationOutcome {
        self.state.lock().await.go_to(screen)
    }

    pub async fn go_back(&self) -> bool {
        self.state.lock().await.navigation.go_back()
    }

    pub async fn current_screen(&self) -> Screen {
        self.state.lock().await.navigation.current()
    }

    pub async fn toggle_drawer(&self) -> bool {
        self.state.lock().await.navigation.toggle_drawer()
    }

    pub async fn set_drawer(&self, open: bool) {
        self.state.lock().await.navigation.set_drawer(open);
    }

    // ============================================================================
    // Study actions
    // ============================================================================

    /// Uploads a document and installs the resulting study artifact.
    ///
    /// On success the study plan screen opens.
    pub async fn upload(&self, request: UploadRequest) -> Result<StudyArtifact> {
        let ticket = {
            let mut state = self.state.lock().await;
            state.begin(ActionKind::Upload, validation::validate_upload(&request))?
        };

        tracing::info!(
            "[StudyMateApp] Uploading {} ({} bytes)",
            request.filename,
            request.bytes.len()
        );
        let outcome = self.backend.upload(&request).await;

        let mut state = self.state.lock().await;
        let artifact = state.settle(ticket, outcome)?;
        state.artifacts.replace(artifact.clone());
        state.actions.succeed(ticket);
        state.notifications.success(UPLOAD_SUCCESS_MESSAGE);
        state.go_to(Screen::StudyPlan);
        Ok(artifact)
    }

    /// Asks a question about the current document.
    ///
    /// On failure the previous answer is left in place.
    pub async fn ask(&self, question: &str) -> Result<QaAnswer> {
        let question = question.trim().to_string();
        let (ticket, session_id) = {
            let mut state = self.state.lock().await;
            let session_id = state.require_artifact().map(|a| a.session_id.clone());
            let check = validation::validate_question(&question)
                .and_then(|_| session_id.as_ref().map(|_| ()).map_err(Clone::clone));
            let ticket = state.begin(ActionKind::Ask, check)?;
            (ticket, session_id?)
        };

        let outcome = self.backend.ask(&session_id, &question).await;

        let mut state = self.state.lock().await;
        let answer = state.settle(ticket, outcome)?;
        state.artifacts.set_last_answer(answer.clone());
        state.actions.succeed(ticket);
        state.notifications.success(ANSWER_SUCCESS_MESSAGE);
        Ok(answer)
    }

    /// Marks a section complete or incomplete.
    ///
    /// The overall percentage comes from the collaborator's response and is
    /// never derived from the section flags.
    pub async fn update_progress(&self, section_id: SectionId, completed: bool) -> Result<f64> {
        let (ticket, session_id) = {
            let mut state = self.state.lock().await;
            let session_id = state.require_artifact().and_then(|a| {
                a.study_plan
                    .section(section_id)
                    .map(|_| a.session_id.clone())
                    .ok_or_else(|| {
                        StudyMateError::validation(format!("Unknown section {}", section_id))
                    })
            });
            let check = session_id.as_ref().map(|_| ()).map_err(Clone::clone);
            let ticket = state.begin(ActionKind::UpdateProgress, check)?;
            (ticket, session_id?)
        };

        let outcome = self
            .backend
            .update_progress(ProgressUpdate {
                session_id: &session_id,
                section_id,
                completed,
            })
            .await;

        let mut state = self.state.lock().await;
        let percent = state.settle(ticket, outcome)?;
        state.artifacts.apply_progress(section_id, completed, percent);
        state.actions.succeed(ticket);
        state.notifications.success(PROGRESS_SUCCESS_MESSAGE);
        Ok(percent)
    }

    pub async fn set_quiz_answer(
        &self,
        section_id: SectionId,
        question_index: usize,
        answer: impl Into<String>,
    ) {
        self.state
            .lock()
            .await
            .artifacts
            .set_quiz_answer(QuestionKey::new(section_id, question_index), answer);
    }

    pub async fn clear_quiz_answers(&self) {
        self.state.lock().await.artifacts.clear_quiz_answers();
    }

    /// Submits the entered quiz answers for grading.
    ///
    /// The result replaces any earlier one and the history log is refreshed
    /// afterwards. The submission itself is kept.
    pub async fn submit_quiz(&self) -> Result<QuizResult> {
        let (ticket, session_id, answers) = {
            let mut state = self.state.lock().await;
            let session_id = state.require_artifact().map(|a| a.session_id.clone());
            let answers = state.artifacts.quiz_submission().to_answers();
            let check = session_id
                .as_ref()
                .map(|_| ())
                .map_err(Clone::clone)
                .and_then(|_| validation::validate_submission(state.artifacts.quiz_submission()));
            let ticket = state.begin(ActionKind::SubmitQuiz, check)?;
            (ticket, session_id?, answers)
        };

        let outcome = self.backend.submit_quiz(&session_id, &answers).await;

        let result = {
            let mut state = self.state.lock().await;
            let result = state.settle(ticket, outcome)?;
            state.artifacts.set_quiz_result(result.clone());
            state.actions.succeed(ticket);
            state.notifications.success(format!(
                "Quiz submitted! Score: {:.0}%",
                result.overall_score_percent
            ));
            result
        };

        if let Err(e) = self.fetch_history().await {
            tracing::debug!("[StudyMateApp] History refresh after quiz skipped: {}", e);
        }
        Ok(result)
    }

    /// Refreshes the history log shown in the session drawer.
    ///
    /// Keyed by the current document session, or the signed-in user when no
    /// document is loaded. Failures never raise a notification.
    pub async fn fetch_history(&self) -> Result<Vec<HistoryEntry>> {
        let (ticket, owner_id) = {
            let mut state = self.state.lock().await;
            let owner_id = state
                .artifacts
                .artifact()
                .map(|a| a.session_id.clone())
                .or_else(|| state.session.session().user_id().map(str::to_string))
                .ok_or_else(|| StudyMateError::validation("No history owner"));
            let check = owner_id.as_ref().map(|_| ()).map_err(Clone::clone);
            let ticket = state.begin(ActionKind::FetchHistory, check)?;
            (ticket, owner_id?)
        };

        let outcome = self.backend.fetch_history(&owner_id).await;

        let mut state = self.state.lock().await;
        let entries = state.settle(ticket, outcome)?;
        state.artifacts.set_history_log(entries.clone());
        state.actions.succeed(ticket);
        Ok(entries)
    }

    /// Drops the current document and opens the upload screen.
    pub async fn start_new_session(&self) {
        let mut state = self.state.lock().await;
        state.artifacts.clear_study();
        state.go_to(Screen::Upload);
        tracing::info!("[StudyMateApp] Started a new study session");
    }

    // ============================================================================
    // Theme, notifications, action slots
    // ============================================================================

    pub async fn set_dark_mode(&self, enabled: bool) {
        self.state.lock().await.preferences.set_dark_mode(enabled);
    }

    pub async fn toggle_dark_mode(&self) -> bool {
        self.state.lock().await.preferences.toggle_dark_mode()
    }

    pub async fn dismiss_notification(&self) {
        self.state.lock().await.notifications.dismiss();
    }

    pub async fn notifications_shown(&self) -> u64 {
        self.state.lock().await.notifications.shown_count()
    }

    pub async fn action(&self, kind: ActionKind) -> AsyncAction {
        self.state.lock().await.actions.get(kind)
    }

    pub async fn is_pending(&self, kind: ActionKind) -> bool {
        self.state.lock().await.actions.is_pending(kind)
    }

    /// Returns a finished action of `kind` to idle.
    pub async fn acknowledge(&self, kind: ActionKind) {
        self.state.lock().await.actions.acknowledge(kind);
    }

    pub async fn snapshot(&self) -> AppSnapshot {
        self.state.lock().await.snapshot()
    }
}

fn session_from_grant(grant: AuthGrant, known_email: &str) -> Session {
    let email = grant
        .email
        .filter(|email| !email.is_empty())
        .unwrap_or_else(|| known_email.to_string());
    Session::authenticated(grant.user_id, grant.name, email)
}
