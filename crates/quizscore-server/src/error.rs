//! JSON error responses.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use quizscore_core::error::{RegistrationError, SubmissionError};

/// An error returned to HTTP clients as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            details: None,
        }
    }

    /// Attach the underlying cause to the response body.
    pub fn with_details(mut self, details: impl fmt::Display) -> Self {
        self.details = Some(details.to_string());
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({ "error": self.message });
        if let Some(details) = self.details {
            body["details"] = json!(details);
        }
        (self.status, Json(body)).into_response()
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::CourseNotFound(_) => ApiError::not_found("Course not found"),
            SubmissionError::MissingCourse => ApiError::bad_request("Invalid submission"),
            other => ApiError::bad_request("Invalid submission").with_details(other),
        }
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Store(e) => {
                tracing::error!("failed to register email: {e}");
                ApiError::internal("Failed to register email").with_details(e)
            }
            other => ApiError::bad_request(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_errors_map_to_status() {
        let not_found: ApiError = SubmissionError::CourseNotFound("x".into()).into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.message, "Course not found");

        let mismatch: ApiError = SubmissionError::AnswerCountMismatch {
            course: "x".into(),
            expected: 2,
            actual: 1,
        }
        .into();
        assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);
        assert!(mismatch.details.unwrap().contains("expected 2 answers"));
    }

    #[test]
    fn registration_errors_map_to_status() {
        let dup: ApiError = RegistrationError::AlreadyRegistered.into();
        assert_eq!(dup.status, StatusCode::BAD_REQUEST);
        assert_eq!(dup.message, "Email already registered");
    }
}
