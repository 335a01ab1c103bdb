//! Wire format of the StudyMate service.
//!
//! The service speaks snake_case JSON and is loose about optional fields, so
//! every DTO defaults what it can and conversion into the domain types
//! happens here rather than in the HTTP code.

use serde::{Deserialize, Serialize};
use studymate_core::artifact::{
    ConceptEdge, ConceptMap, ConceptNode, HistoryEntry, HistoryEvent, QaAnswer, QuestionResult,
    QuizAnswer, QuizQuestion, QuizResult, Section, SectionId, StudyArtifact, StudyPlan,
};
use studymate_core::backend::AuthGrant;

/// `{ "error": "..." }` body carried by failed responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

impl ErrorBody {
    /// Extracts the `error` field from a raw body, if the body is JSON and has one.
    pub fn message_from(raw: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(raw)
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.trim().is_empty())
    }
}

// ============================================================================
// Upload
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub user_id: String,
    #[serde(default)]
    pub filename: Option<String>,
    pub study_plan: StudyPlanDto,
    #[serde(default)]
    pub concept_map: ConceptMapDto,
}

#[derive(Debug, Deserialize)]
pub struct StudyPlanDto {
    #[serde(default)]
    pub sections: Vec<SectionDto>,
    #[serde(default)]
    pub estimated_duration: u32,
    #[serde(default)]
    pub progress: f64,
}

#[derive(Debug, Deserialize)]
pub struct SectionDto {
    pub id: SectionId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub key_concepts: Vec<String>,
    #[serde(default)]
    pub quiz_questions: Vec<QuizQuestionDto>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct QuizQuestionDto {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConceptMapDto {
    #[serde(default)]
    pub nodes: Vec<ConceptNodeDto>,
    #[serde(default)]
    pub edges: Vec<ConceptEdgeDto>,
}

#[derive(Debug, Deserialize)]
pub struct ConceptNodeDto {
    pub label: String,
    #[serde(rename = "type", default)]
    pub node_type: String,
}

#[derive(Debug, Deserialize)]
pub struct ConceptEdgeDto {
    pub source: String,
    pub target: String,
    #[serde(rename = "type", default)]
    pub edge_type: String,
}

impl UploadResponse {
    /// `fallback_filename` is used when the service does not echo the name back.
    pub fn into_artifact(self, fallback_filename: &str) -> StudyArtifact {
        let sections = self
            .study_plan
            .sections
            .into_iter()
            .map(|s| Section {
                id: s.id,
                title: s.title,
                content: s.content,
                key_concepts: s.key_concepts,
                quiz_questions: s
                    .quiz_questions
                    .into_iter()
                    .map(|q| QuizQuestion {
                        question: q.question,
                        answer: q.answer,
                    })
                    .collect(),
                completed: s.completed,
            })
            .collect();

        StudyArtifact {
            session_id: self.user_id,
            filename: self
                .filename
                .unwrap_or_else(|| fallback_filename.to_string()),
            study_plan: StudyPlan {
                sections,
                overall_progress_percent: self.study_plan.progress.clamp(0.0, 100.0),
                estimated_duration_minutes: self.study_plan.estimated_duration,
            },
            concept_map: ConceptMap {
                nodes: self
                    .concept_map
                    .nodes
                    .into_iter()
                    .map(|n| ConceptNode {
                        label: n.label,
                        node_type: n.node_type,
                    })
                    .collect(),
                edges: self
                    .concept_map
                    .edges
                    .into_iter()
                    .map(|e| ConceptEdge {
                        source: e.source,
                        target: e.target,
                        edge_type: e.edge_type,
                    })
                    .collect(),
            },
        }
    }
}

// ============================================================================
// Q&A
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AskRequest<'a> {
    pub user_id: &'a str,
    pub question: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub context: Option<String>,
}

impl AskResponse {
    pub fn into_answer(self, question: &str) -> QaAnswer {
        QaAnswer {
            question: question.to_string(),
            answer: self.answer,
            confidence: self.confidence.clamp(0.0, 1.0),
            explanation: self.explanation,
            context: self.context,
        }
    }
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Serialize)]
pub struct GoogleLoginRequest<'a> {
    pub credential: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<AuthResponse> for AuthGrant {
    fn from(response: AuthResponse) -> Self {
        AuthGrant {
            user_id: response.user_id,
            name: response.name,
            email: response.email,
        }
    }
}

// ============================================================================
// Progress, quiz, history
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ProgressRequest {
    pub section_id: SectionId,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct ProgressResponse {
    pub progress: f64,
}

#[derive(Debug, Serialize)]
pub struct QuizRequest<'a> {
    pub user_id: &'a str,
    pub answers: &'a [QuizAnswer],
}

#[derive(Debug, Deserialize)]
pub struct QuizResponse {
    pub score: f64,
    #[serde(default)]
    pub results: Vec<QuestionResultDto>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionResultDto {
    pub section_id: SectionId,
    pub question_index: usize,
    pub correct: bool,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl From<QuizResponse> for QuizResult {
    fn from(response: QuizResponse) -> Self {
        QuizResult {
            overall_score_percent: response.score,
            results: response
                .results
                .into_iter()
                .map(|r| QuestionResult {
                    section_id: r.section_id,
                    question_index: r.question_index,
                    correct: r.correct,
                    explanation: r.explanation,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryRequest<'a> {
    pub user_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryItemDto>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryItemDto {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub timestamp: String,
}

impl HistoryResponse {
    /// Converts known entry types; unknown ones are skipped.
    pub fn into_entries(self) -> Vec<HistoryEntry> {
        self.history
            .into_iter()
            .filter_map(|item| {
                let event = match item.kind.as_str() {
                    "upload" => HistoryEvent::Upload {
                        filename: item.filename.unwrap_or_default(),
                    },
                    "quiz" => HistoryEvent::Quiz {
                        score: item.score.unwrap_or_default(),
                    },
                    other => {
                        tracing::debug!("[Wire] Skipping history entry of type {:?}", other);
                        return None;
                    }
                };
                Some(HistoryEntry {
                    event,
                    timestamp: item.timestamp,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_into_artifact() {
        let raw = r#"{
            "message": "File uploaded successfully",
            "filename": "biology.pdf",
            "user_id": "3f1c",
            "study_plan": {
                "user_id": "3f1c",
                "created_at": "2024-05-01T10:00:00",
                "sections": [{
                    "id": 1,
                    "title": "Section 1",
                    "content": "Cells divide...",
                    "key_concepts": ["divide"],
                    "estimated_time": 30,
                    "completed": false,
                    "quiz_questions": [{"question": "Cells _____", "answer": "divide", "type": "fill_blank"}]
                }],
                "total_sections": 1,
                "estimated_duration": 30,
                "progress": 0
            },
            "concept_map": {
                "nodes": [{"id": "Cells", "label": "Cells", "type": "concept", "frequency": 1}],
                "edges": [{"source": "Cells", "target": "divide", "type": "related"}]
            }
        }"#;

        let artifact = serde_json::from_str::<UploadResponse>(raw)
            .unwrap()
            .into_artifact("fallback.pdf");

        assert_eq!(artifact.session_id, "3f1c");
        assert_eq!(artifact.filename, "biology.pdf");
        assert_eq!(artifact.study_plan.sections.len(), 1);
        assert_eq!(artifact.study_plan.overall_progress_percent, 0.0);
        assert_eq!(artifact.study_plan.estimated_duration_minutes, 30);
        assert_eq!(artifact.study_plan.sections[0].quiz_questions[0].answer, "divide");
        assert_eq!(artifact.concept_map.nodes[0].node_type, "concept");
        assert_eq!(artifact.concept_map.edges[0].edge_type, "related");
    }

    #[test]
    fn test_error_body_message() {
        assert_eq!(
            ErrorBody::message_from(r#"{"error":"server error"}"#).as_deref(),
            Some("server error")
        );
        assert_eq!(ErrorBody::message_from(r#"{"error":""}"#), None);
        assert_eq!(ErrorBody::message_from("<html>Bad Gateway</html>"), None);
    }

    #[test]
    fn test_ask_response_clamps_confidence() {
        let answer = serde_json::from_str::<AskResponse>(
            r#"{"answer":"Mitosis","confidence":1.4,"explanation":"found it"}"#,
        )
        .unwrap()
        .into_answer("What is X?");

        assert_eq!(answer.question, "What is X?");
        assert_eq!(answer.confidence, 1.0);
        assert!(answer.context.is_none());
    }

    #[test]
    fn test_quiz_response_conversion() {
        let result: QuizResult = serde_json::from_str::<QuizResponse>(
            r#"{"score":50.0,"results":[
                {"section_id":1,"question_index":0,"correct":true},
                {"section_id":1,"question_index":1,"correct":false,"explanation":"The correct answer is 'divide'."}
            ]}"#,
        )
        .unwrap()
        .into();

        assert_eq!(result.overall_score_percent, 50.0);
        assert_eq!(result.correct_count(), 1);
        assert!(result.results[1].explanation.is_some());
    }

    #[test]
    fn test_history_skips_unknown_types() {
        let entries = serde_json::from_str::<HistoryResponse>(
            r#"{"history":[
                {"type":"upload","filename":"a.pdf","timestamp":"2024-05-01T10:00:00"},
                {"type":"quiz","score":75.0,"timestamp":"2024-05-01T11:00:00","results":[]},
                {"type":"badge","timestamp":"2024-05-01T12:00:00"}
            ]}"#,
        )
        .unwrap()
        .into_entries();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].event, HistoryEvent::Quiz { score: 75.0 });
    }

    #[test]
    fn test_quiz_request_shape() {
        let answers = vec![QuizAnswer {
            section_id: 2,
            question_index: 1,
            answer: "divide".to_string(),
        }];
        let body = serde_json::to_value(QuizRequest {
            user_id: "s-1",
            answers: &answers,
        })
        .unwrap();

        assert_eq!(body["user_id"], "s-1");
        assert_eq!(body["answers"][0]["section_id"], 2);
        assert_eq!(body["answers"][0]["question_index"], 1);
    }
}
