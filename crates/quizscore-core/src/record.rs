//! Persisted participant records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Answer;
use crate::scoring::AssessmentResult;

/// A participant, keyed by normalized email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<AssessmentResult>,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// A blank record for a pre-registered email.
    pub fn registered(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            email: email.into(),
            course: String::new(),
            answers: Vec::new(),
            result: None,
            created_at: Utc::now(),
        }
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }
}

/// The public view of a record that has been scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub name: String,
    pub email: String,
    pub course: String,
    pub result: AssessmentResult,
}

impl ResultSummary {
    pub fn from_record(record: &UserRecord) -> Option<Self> {
        record.result.as_ref().map(|result| Self {
            name: record.name.clone(),
            email: record.email.clone(),
            course: record.course.clone(),
            result: result.clone(),
        })
    }
}

/// Trim and lowercase an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalize every email and drop blanks and repeats, keeping the first
/// occurrence of each.
pub fn dedupe_emails<S: AsRef<str>>(emails: &[S]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    emails
        .iter()
        .map(|e| normalize_email(e.as_ref()))
        .filter(|e| !e.is_empty() && seen.insert(e.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_email("  Ada@Example.COM \n"), "ada@example.com");
    }

    #[test]
    fn dedupe_keeps_first_occurrence_order() {
        let emails = ["b@x.io", "A@x.io", " b@x.io", "", "a@x.io ", "c@x.io"];
        assert_eq!(dedupe_emails(&emails), vec!["b@x.io", "a@x.io", "c@x.io"]);
    }

    #[test]
    fn registered_record_is_blank() {
        let record = UserRecord::registered("ada@example.com");
        assert!(record.name.is_empty());
        assert!(record.answers.is_empty());
        assert!(!record.has_result());
        assert!(ResultSummary::from_record(&record).is_none());
    }

    #[test]
    fn record_wire_shape_is_camel_case() {
        let record = UserRecord::registered("ada@example.com");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("result").is_none());
        let back: UserRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
