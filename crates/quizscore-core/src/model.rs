//! Question and answer data types.
//!
//! Questions are immutable reference data grouped per course. Answers are
//! positional: the answer at index `i` belongs to the question at index `i`
//! of the course's full question list.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::catalog::Trait;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Optional stable identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Prompt shown to the participant.
    #[serde(default, alias = "question")]
    pub text: String,
    /// Trait this question measures.
    #[serde(rename = "trait")]
    pub measures: Trait,
    /// Selectable options, each worth a numeric value.
    #[serde(default)]
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Highest value any option of this question is worth, or 0 if there are
    /// no options.
    pub fn max_value(&self) -> f64 {
        self.options
            .iter()
            .map(|o| o.value)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
            .unwrap_or(0.0)
    }
}

/// One selectable answer to a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Text shown for the option.
    #[serde(default, alias = "text")]
    pub label: String,
    /// Score contributed when this option is chosen.
    pub value: f64,
}

/// An answer slot. `None` means the question was left unanswered.
pub type Answer = Option<f64>;

/// Question lists keyed by course name.
///
/// Each course keeps the JSON it was loaded from next to the typed
/// questions, so clients are served the bank exactly as written, including
/// fields scoring does not use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionBank {
    courses: BTreeMap<String, CourseQuestions>,
}

#[derive(Debug, Clone, PartialEq)]
struct CourseQuestions {
    questions: Vec<Question>,
    source: Vec<Value>,
}

impl QuestionBank {
    /// Questions for a course, in the order answers must follow.
    pub fn course(&self, name: &str) -> Option<&[Question]> {
        self.courses.get(name).map(|c| c.questions.as_slice())
    }

    /// A course's questions as they appeared in the loaded JSON.
    pub fn course_json(&self, name: &str) -> Option<&[Value]> {
        self.courses.get(name).map(|c| c.source.as_slice())
    }

    /// Course names in sorted order.
    pub fn course_names(&self) -> impl Iterator<Item = &str> {
        self.courses.keys().map(String::as_str)
    }

    /// Iterate over every course and its questions.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Question])> {
        self.courses
            .iter()
            .map(|(name, c)| (name.as_str(), c.questions.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl<'de> Deserialize<'de> for QuestionBank {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: BTreeMap<String, Vec<Value>> = BTreeMap::deserialize(deserializer)?;
        let mut courses = BTreeMap::new();
        for (name, source) in raw {
            let questions = source
                .iter()
                .enumerate()
                .map(|(i, q)| {
                    Question::deserialize(q).map_err(|e| {
                        D::Error::custom(format!("course {name}, question {}: {e}", i + 1))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            courses.insert(name, CourseQuestions { questions, source });
        }
        Ok(Self { courses })
    }
}

impl Serialize for QuestionBank {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.courses.iter().map(|(name, c)| (name, &c.source)))
    }
}

/// Deserialize an answer array, turning anything that is not a JSON number
/// into an unanswered slot.
pub fn deserialize_answers<'de, D>(deserializer: D) -> Result<Vec<Answer>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Value> = Vec::deserialize(deserializer)?;
    Ok(raw.iter().map(Value::as_f64).collect())
}
