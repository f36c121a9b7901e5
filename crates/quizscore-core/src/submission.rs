//! Submitted answer sets and their boundary checks.

use serde::{Deserialize, Serialize};

use crate::error::SubmissionError;
use crate::model::{deserialize_answers, Answer, Question, QuestionBank};

/// A participant's answers to one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub course: String,
    /// One slot per course question, in question order. Non-numeric entries
    /// are unanswered.
    #[serde(deserialize_with = "deserialize_answers")]
    pub answers: Vec<Answer>,
}

impl Submission {
    /// Resolve the course's questions and check the answers line up with them.
    pub fn validate<'b>(&self, bank: &'b QuestionBank) -> Result<&'b [Question], SubmissionError> {
        let course = self.course.trim();
        if course.is_empty() {
            return Err(SubmissionError::MissingCourse);
        }

        let questions = bank
            .course(course)
            .ok_or_else(|| SubmissionError::CourseNotFound(course.to_string()))?;

        if self.answers.len() != questions.len() {
            return Err(SubmissionError::AnswerCountMismatch {
                course: course.to_string(),
                expected: questions.len(),
                actual: self.answers.len(),
            });
        }

        Ok(questions)
    }

    /// The submitted email, if one was given and is not blank.
    pub fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}
