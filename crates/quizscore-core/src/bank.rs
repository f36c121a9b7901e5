//! JSON question bank loader.
//!
//! Loads course question lists from a JSON file shaped
//! `{ "<course>": [question, ...] }` and checks them for common issues.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::catalog::Trait;
use crate::model::QuestionBank;

/// Load a question bank from a JSON file.
pub fn load_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_question_bank_str(&content, path)
}

/// Parse a JSON string into a `QuestionBank` (useful for testing).
pub fn parse_question_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let bank: QuestionBank = serde_json::from_str(content)
        .with_context(|| format!("failed to parse question bank: {}", source_path.display()))?;

    tracing::debug!(
        path = %source_path.display(),
        courses = bank.len(),
        "loaded question bank"
    );
    Ok(bank)
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct BankWarning {
    /// The course the warning applies to.
    pub course: String,
    /// Position of the offending question, if the warning is about one.
    pub question_index: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a question bank for issues that would skew scoring.
pub fn validate_bank(bank: &QuestionBank) -> Vec<BankWarning> {
    let mut warnings = Vec::new();

    for (course, questions) in bank.iter() {
        let warn = |index: Option<usize>, message: String| BankWarning {
            course: course.to_string(),
            question_index: index,
            message,
        };

        if questions.is_empty() {
            warnings.push(warn(None, "course has no questions".into()));
            continue;
        }

        let mut seen_ids = HashSet::new();
        for (i, q) in questions.iter().enumerate() {
            if q.options.is_empty() {
                warnings.push(warn(Some(i), "question has no options".into()));
            }
            if q.options.iter().any(|o| o.value < 0.0) {
                warnings.push(warn(Some(i), "question has a negative option value".into()));
            }
            if let Some(id) = &q.id {
                if !seen_ids.insert(id.as_str()) {
                    warnings.push(warn(Some(i), format!("duplicate question ID: {id}")));
                }
            }
        }

        let covered: HashSet<Trait> = questions.iter().map(|q| q.measures).collect();
        for t in Trait::ALL {
            if !covered.contains(&t) {
                warnings.push(warn(None, format!("no questions measure {t}")));
            }
        }
    }

    warnings
}
