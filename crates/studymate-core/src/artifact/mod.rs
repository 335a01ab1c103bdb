//! Study artifact domain module.
//!
//! # Module Structure
//!
//! - `model`: Study plan, sections, concept map and Q&A answer
//! - `quiz`: Quiz submission (user input) and quiz result (graded output)
//! - `history`: Activity log entries

mod history;
mod model;
mod quiz;

pub use history::{HistoryEntry, HistoryEvent};
pub use model::{
    ConceptEdge, ConceptMap, ConceptNode, QaAnswer, QuizQuestion, Section, SectionId,
    StudyArtifact, StudyPlan,
};
pub use quiz::{QuestionKey, QuestionResult, QuizAnswer, QuizResult, QuizSubmission};
