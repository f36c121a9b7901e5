//! Error types for the quizscore core.
//!
//! Scoring itself never fails once a `TraitWeights` has been built; these
//! errors cover the boundaries around it: weight configuration, submission
//! validation, and record persistence.

use thiserror::Error;

/// Errors raised while building a trait weight table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// A trait name does not belong to the catalog.
    #[error("unknown trait: {0}")]
    UnknownTrait(String),

    /// A weight is outside [0.0, 1.0] or not finite.
    #[error("weight for {trait_name} must be within 0.0..=1.0, got {weight}")]
    WeightOutOfRange { trait_name: String, weight: f64 },

    /// Every member of a composite has zero weight.
    #[error("composite {0} has no weighted traits")]
    ZeroWeightComposite(String),

    /// Several problems were found at once.
    #[error("invalid weights: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<CatalogError>),
}

/// Errors from validating a submission before it reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// No course was named.
    #[error("course is required")]
    MissingCourse,

    /// The named course has no question list.
    #[error("course not found: {0}")]
    CourseNotFound(String),

    /// Answers are not positionally aligned with the course's questions.
    #[error("expected {expected} answers for course {course}, got {actual}")]
    AnswerCountMismatch {
        course: String,
        expected: usize,
        actual: usize,
    },
}

impl SubmissionError {
    /// Returns `true` if the submission named a course that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SubmissionError::CourseNotFound(_))
    }
}

/// Errors from a record store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with this email already exists.
    #[error("email already registered: {0}")]
    Duplicate(String),

    /// The backing file could not be read or written.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file holds invalid JSON.
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from registering a single email.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The email was blank after trimming.
    #[error("Email is required")]
    Empty,

    /// The email is already present in the store.
    #[error("Email already registered")]
    AlreadyRegistered,

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
