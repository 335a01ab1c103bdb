//! Screens the client can display.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A top-level screen of the study client.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Screen {
    /// Landing screen shown before sign-in. Always the bottom of the history.
    Entry,
    Auth,
    Dashboard,
    Upload,
    #[strum(serialize = "qa")]
    #[serde(rename = "qa")]
    Qa,
    StudyPlan,
    ConceptMap,
    Quiz,
    History,
}

impl Screen {
    /// Screens that render an uploaded study artifact and are unreachable
    /// until an upload has succeeded.
    pub fn requires_artifact(self) -> bool {
        matches!(
            self,
            Screen::Qa | Screen::StudyPlan | Screen::ConceptMap | Screen::Quiz
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_artifact_guarded_screens() {
        let guarded: Vec<Screen> = Screen::iter().filter(|s| s.requires_artifact()).collect();
        assert_eq!(
            guarded,
            vec![Screen::Qa, Screen::StudyPlan, Screen::ConceptMap, Screen::Quiz]
        );
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(Screen::from_str("study_plan").unwrap(), Screen::StudyPlan);
        assert_eq!(Screen::from_str("QA").unwrap(), Screen::Qa);
        assert_eq!(Screen::ConceptMap.to_string(), "concept_map");
        assert!(Screen::from_str("settings").is_err());
    }
}
