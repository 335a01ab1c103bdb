//! Scripted in-process collaborator shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use studymate_application::StudyMateApp;
use studymate_core::action::ActionKind;
use studymate_core::artifact::{
    ConceptMap, ConceptNode, HistoryEntry, HistoryEvent, QaAnswer, QuizAnswer, QuizQuestion,
    QuizResult, Section, StudyArtifact, StudyPlan,
};
use studymate_core::backend::{
    AuthGrant, Credentials, FederatedCredential, ProgressUpdate, Registration, StudyBackend,
    UploadRequest,
};
use studymate_core::config::PolicyConfig;
use studymate_core::error::Result;
use studymate_infrastructure::MemoryClientStorage;
use tokio::sync::Notify;

/// Study artifact with one incomplete section holding two quiz questions.
pub fn sample_artifact(session_id: &str, filename: &str) -> StudyArtifact {
    StudyArtifact {
        session_id: session_id.to_string(),
        filename: filename.to_string(),
        study_plan: StudyPlan {
            sections: vec![Section {
                id: 1,
                title: "Section 1".to_string(),
                content: "Cells divide to reproduce.".to_string(),
                key_concepts: vec!["divide".to_string()],
                quiz_questions: vec![
                    QuizQuestion {
                        question: "Cells _____ to reproduce.".to_string(),
                        answer: "divide".to_string(),
                    },
                    QuizQuestion {
                        question: "_____ divide to reproduce.".to_string(),
                        answer: "Cells".to_string(),
                    },
                ],
                completed: false,
            }],
            overall_progress_percent: 0.0,
            estimated_duration_minutes: 30,
        },
        concept_map: ConceptMap {
            nodes: vec![ConceptNode {
                label: "Cells".to_string(),
                node_type: "concept".to_string(),
            }],
            edges: vec![],
        },
    }
}

pub fn sample_answer(text: &str) -> QaAnswer {
    QaAnswer {
        question: "What is X?".to_string(),
        answer: text.to_string(),
        confidence: 0.8,
        explanation: "Found in section 1".to_string(),
        context: None,
    }
}

pub fn grant(user_id: &str, name: &str) -> AuthGrant {
    AuthGrant {
        user_id: user_id.to_string(),
        name: name.to_string(),
        email: None,
    }
}

pub fn upload_entry(filename: &str) -> HistoryEntry {
    HistoryEntry {
        event: HistoryEvent::Upload {
            filename: filename.to_string(),
        },
        timestamp: "2024-05-01T10:00:00".to_string(),
    }
}

/// Collaborator whose responses are set per test.
///
/// Unset responses succeed with sample data. [`MockBackend::hold`] parks the
/// next call of a kind until the returned gate is notified, and
/// [`MockBackend::entered`] resolves once a call of that kind has started.
#[derive(Default)]
pub struct MockBackend {
    upload_response: Mutex<Option<Result<StudyArtifact>>>,
    ask_response: Mutex<Option<Result<QaAnswer>>>,
    auth_response: Mutex<Option<Result<AuthGrant>>>,
    progress_response: Mutex<Option<Result<f64>>>,
    quiz_response: Mutex<Option<Result<QuizResult>>>,
    history_response: Mutex<Option<Result<Vec<HistoryEntry>>>>,
    calls: Mutex<HashMap<ActionKind, usize>>,
    gates: Mutex<HashMap<ActionKind, Arc<Notify>>>,
    entered: Mutex<HashMap<ActionKind, Arc<Notify>>>,
    submitted_answers: Mutex<Vec<QuizAnswer>>,
    history_owners: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond_upload(&self, response: Result<StudyArtifact>) {
        *self.upload_response.lock().unwrap() = Some(response);
    }

    pub fn respond_ask(&self, response: Result<QaAnswer>) {
        *self.ask_response.lock().unwrap() = Some(response);
    }

    pub fn respond_auth(&self, response: Result<AuthGrant>) {
        *self.auth_response.lock().unwrap() = Some(response);
    }

    pub fn respond_progress(&self, response: Result<f64>) {
        *self.progress_response.lock().unwrap() = Some(response);
    }

    pub fn respond_quiz(&self, response: Result<QuizResult>) {
        *self.quiz_response.lock().unwrap() = Some(response);
    }

    pub fn respond_history(&self, response: Result<Vec<HistoryEntry>>) {
        *self.history_response.lock().unwrap() = Some(response);
    }

    pub fn calls(&self, kind: ActionKind) -> usize {
        self.calls.lock().unwrap().get(&kind).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn submitted_answers(&self) -> Vec<QuizAnswer> {
        self.submitted_answers.lock().unwrap().clone()
    }

    pub fn history_owners(&self) -> Vec<String> {
        self.history_owners.lock().unwrap().clone()
    }

    /// Parks the next call of `kind`; notify the returned gate to release it.
    pub fn hold(&self, kind: ActionKind) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(kind, gate.clone());
        // Forget entries signalled by earlier calls.
        self.entered
            .lock()
            .unwrap()
            .insert(kind, Arc::new(Notify::new()));
        gate
    }

    /// Resolves once a call of `kind` has reached the collaborator.
    pub async fn entered(&self, kind: ActionKind) {
        let signal = self.entered_signal(kind);
        signal.notified().await;
    }

    fn entered_signal(&self, kind: ActionKind) -> Arc<Notify> {
        self.entered
            .lock()
            .unwrap()
            .entry(kind)
            .or_default()
            .clone()
    }

    async fn record(&self, kind: ActionKind) {
        *self.calls.lock().unwrap().entry(kind).or_insert(0) += 1;
        self.entered_signal(kind).notify_one();
        let gate = self.gates.lock().unwrap().remove(&kind);
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    fn auth(&self) -> Result<AuthGrant> {
        self.auth_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(grant("u-1", "Ada")))
    }
}

#[async_trait]
impl StudyBackend for MockBackend {
    async fn upload(&self, request: &UploadRequest) -> Result<StudyArtifact> {
        self.record(ActionKind::Upload).await;
        self.upload_response.lock().unwrap().clone().unwrap_or_else(|| {
            Ok(sample_artifact(
                &format!("s-{}", request.filename),
                &request.filename,
            ))
        })
    }

    async fn ask(&self, _session_id: &str, _question: &str) -> Result<QaAnswer> {
        self.record(ActionKind::Ask).await;
        self.ask_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(sample_answer("Mitosis")))
    }

    async fn login(&self, _credentials: &Credentials) -> Result<AuthGrant> {
        self.record(ActionKind::Login).await;
        self.auth()
    }

    async fn register(&self, _registration: &Registration) -> Result<AuthGrant> {
        self.record(ActionKind::Register).await;
        self.auth()
    }

    async fn google_login(&self, _credential: &FederatedCredential) -> Result<AuthGrant> {
        self.record(ActionKind::GoogleLogin).await;
        self.auth()
    }

    async fn update_progress(&self, _update: ProgressUpdate<'_>) -> Result<f64> {
        self.record(ActionKind::UpdateProgress).await;
        self.progress_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(Ok(0.0))
    }

    async fn submit_quiz(&self, _session_id: &str, answers: &[QuizAnswer]) -> Result<QuizResult> {
        *self.submitted_answers.lock().unwrap() = answers.to_vec();
        self.record(ActionKind::SubmitQuiz).await;
        self.quiz_response.lock().unwrap().clone().unwrap_or_else(|| {
            Ok(QuizResult {
                overall_score_percent: 100.0,
                results: vec![],
            })
        })
    }

    async fn fetch_history(&self, owner_id: &str) -> Result<Vec<HistoryEntry>> {
        self.history_owners
            .lock()
            .unwrap()
            .push(owner_id.to_string());
        self.record(ActionKind::FetchHistory).await;
        self.history_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(Ok(vec![]))
    }

    async fn health(&self) -> Result<()> {
        Ok(())
    }
}

pub struct Harness {
    pub app: Arc<StudyMateApp>,
    pub backend: Arc<MockBackend>,
    pub storage: MemoryClientStorage,
}

pub fn harness() -> Harness {
    harness_with(MemoryClientStorage::new(), PolicyConfig::default())
}

pub fn harness_with(storage: MemoryClientStorage, policy: PolicyConfig) -> Harness {
    let backend = MockBackend::new();
    let app = StudyMateApp::new(backend.clone(), Arc::new(storage.clone()), policy);
    Harness {
        app: Arc::new(app),
        backend,
        storage,
    }
}

/// Harness with a study artifact already uploaded.
pub async fn harness_with_artifact() -> Harness {
    let harness = harness();
    harness
        .app
        .upload(UploadRequest::new("notes.pdf", b"cells divide".to_vec()))
        .await
        .unwrap();
    harness
}
