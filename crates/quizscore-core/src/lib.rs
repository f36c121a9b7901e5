//! quizscore-core: Trait scoring engine and the data it works on.
//!
//! This crate holds the trait catalog, the scoring engine, question banks,
//! submission checks, participant records, and the record store contract
//! that the server and CLI build on.

pub mod bank;
pub mod catalog;
pub mod error;
pub mod model;
pub mod record;
pub mod registration;
pub mod scoring;
pub mod store;
pub mod submission;

pub use catalog::{Composite, LearningStyle, Trait, TraitWeights};
pub use error::{CatalogError, RegistrationError, StoreError, SubmissionError};
pub use model::{Answer, AnswerOption, Question, QuestionBank};
pub use scoring::{AssessmentResult, ScoringEngine, TraitScores};
