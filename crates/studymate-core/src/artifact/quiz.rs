//! Quiz submission and result models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::SectionId;

/// Address of one quiz question inside a study plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionKey {
    pub section_id: SectionId,
    pub question_index: usize,
}

impl QuestionKey {
    pub fn new(section_id: SectionId, question_index: usize) -> Self {
        Self {
            section_id,
            question_index,
        }
    }
}

/// A single answer as sent to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub section_id: SectionId,
    pub question_index: usize,
    pub answer: String,
}

/// Free-text answers the user has typed so far.
///
/// Kept across failed and successful submissions so the user can retry; only
/// [`QuizSubmission::clear`] empties it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizSubmission {
    answers: BTreeMap<QuestionKey, String>,
}

impl QuizSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: QuestionKey, answer: impl Into<String>) {
        self.answers.insert(key, answer.into());
    }

    pub fn get(&self, key: QuestionKey) -> Option<&str> {
        self.answers.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    /// Answers in `(section_id, question_index)` order.
    pub fn to_answers(&self) -> Vec<QuizAnswer> {
        self.answers
            .iter()
            .map(|(key, answer)| QuizAnswer {
                section_id: key.section_id,
                question_index: key.question_index,
                answer: answer.clone(),
            })
            .collect()
    }
}

/// Outcome for one submitted answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub section_id: SectionId,
    pub question_index: usize,
    pub correct: bool,
    pub explanation: Option<String>,
}

/// The graded result of the last successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub overall_score_percent: f64,
    pub results: Vec<QuestionResult>,
}

impl QuizResult {
    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| r.correct).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_are_ordered_by_key() {
        let mut submission = QuizSubmission::new();
        submission.set(QuestionKey::new(2, 0), "b");
        submission.set(QuestionKey::new(1, 1), "a2");
        submission.set(QuestionKey::new(1, 0), "a1");

        let order: Vec<(SectionId, usize)> = submission
            .to_answers()
            .iter()
            .map(|a| (a.section_id, a.question_index))
            .collect();
        assert_eq!(order, vec![(1, 0), (1, 1), (2, 0)]);
    }

    #[test]
    fn test_set_overwrites_previous_answer() {
        let mut submission = QuizSubmission::new();
        let key = QuestionKey::new(1, 0);
        submission.set(key, "first");
        submission.set(key, "second");
        assert_eq!(submission.len(), 1);
        assert_eq!(submission.get(key), Some("second"));
    }
}
