//! Study artifact domain models.
//!
//! Everything the collaborator derives from an uploaded document: the study
//! plan with its sections and quiz questions, and the concept map.

use serde::{Deserialize, Serialize};

/// Identifier of a study plan section, unique within one artifact.
pub type SectionId = u32;

/// A fill-in question generated for a section, with its expected answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub answer: String,
}

/// One section of a study plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub content: String,
    pub key_concepts: Vec<String>,
    pub quiz_questions: Vec<QuizQuestion>,
    pub completed: bool,
}

/// Ordered sections plus the progress value last acknowledged by the
/// collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub sections: Vec<Section>,
    /// Always a value the collaborator returned; never recomputed locally.
    pub overall_progress_percent: f64,
    pub estimated_duration_minutes: u32,
}

impl StudyPlan {
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub(crate) fn section_mut(&mut self, id: SectionId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    /// Number of quiz questions across all sections.
    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.quiz_questions.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptNode {
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConceptMap {
    pub nodes: Vec<ConceptNode>,
    pub edges: Vec<ConceptEdge>,
}

/// The full result of a successful upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyArtifact {
    /// Collaborator-side identifier used by every follow-up action.
    pub session_id: String,
    pub filename: String,
    pub study_plan: StudyPlan,
    pub concept_map: ConceptMap,
}

impl StudyArtifact {
    /// Applies an acknowledged progress update: the section's flag and the
    /// collaborator's overall percentage. Returns `false` if the section is
    /// unknown, in which case nothing changes.
    pub fn apply_progress(
        &mut self,
        section_id: SectionId,
        completed: bool,
        overall_progress_percent: f64,
    ) -> bool {
        let Some(section) = self.study_plan.section_mut(section_id) else {
            return false;
        };
        section.completed = completed;
        self.study_plan.overall_progress_percent = overall_progress_percent.clamp(0.0, 100.0);
        true
    }
}

/// The most recent answer to a question asked against the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaAnswer {
    pub question: String,
    pub answer: String,
    /// In `[0, 1]`.
    pub confidence: f64,
    pub explanation: String,
    pub context: Option<String>,
}
