//! Activity history shown in the session drawer.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HistoryEvent {
    Upload { filename: String },
    Quiz { score: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub event: HistoryEvent,
    /// ISO-8601 local timestamp as reported by the collaborator.
    pub timestamp: String,
}

impl HistoryEntry {
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_iso_timestamp_with_fraction() {
        let entry = HistoryEntry {
            event: HistoryEvent::Quiz { score: 50.0 },
            timestamp: "2024-05-01T12:30:45.123456".to_string(),
        };
        let parsed = entry.parsed_timestamp().unwrap();
        assert_eq!(parsed.format("%H:%M").to_string(), "12:30");
    }

    #[test]
    fn test_deserializes_tagged_entry() {
        let entry: HistoryEntry = serde_json::from_str(
            r#"{"type":"upload","filename":"notes.pdf","timestamp":"2024-05-01T12:30:45"}"#,
        )
        .unwrap();
        assert_eq!(
            entry.event,
            HistoryEvent::Upload {
                filename: "notes.pdf".to_string()
            }
        );
    }
}
