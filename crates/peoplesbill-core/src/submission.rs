//! Citizen submissions as consumed by clustering and clause drafting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::region::Region;

fn default_language() -> String {
    "en".to_string()
}

/// A citizen-authored text contribution with demographic metadata.
///
/// The `id` is assigned by whatever persists submissions; nothing in this
/// workspace allocates ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub content: String,
    pub region: Region,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Submission {
    /// Minimal submission with no demographics, in English.
    pub fn new(id: i64, content: impl Into<String>, region: Region) -> Self {
        Self {
            id,
            content: content.into(),
            region,
            age: None,
            occupation: None,
            language: default_language(),
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{"id": 7, "content": "Declare assets yearly", "region": "Ashanti"}"#;
        let sub: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(sub.id, 7);
        assert_eq!(sub.region, Region::Ashanti);
        assert_eq!(sub.language, "en");
        assert!(sub.age.is_none());
        assert!(sub.created_at.is_none());
    }

    #[test]
    fn deserializes_full_record() {
        let json = r#"{
            "id": 12,
            "content": "Ban corrupt officers for 10 years",
            "region": "Upper East",
            "age": 34,
            "occupation": "Teacher",
            "language": "tw",
            "created_at": "2026-03-01T09:30:00Z"
        }"#;
        let sub: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(sub.region, Region::UpperEast);
        assert_eq!(sub.age, Some(34));
        assert_eq!(sub.occupation.as_deref(), Some("Teacher"));
        assert_eq!(sub.language, "tw");
        assert!(sub.created_at.is_some());
    }
}
