//! Request handlers for the quiz API.

use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::instrument;

use quizscore_core::record::{normalize_email, ResultSummary};
use quizscore_core::registration::{self, RegistrationSummary};
use quizscore_core::store::SubmissionUpdate;
use quizscore_core::submission::Submission;

use crate::error::ApiError;
use crate::AppState;

pub async fn root() -> &'static str {
    "Personality Quiz API is running."
}

/// The course's questions exactly as they appear in the question bank.
#[instrument(skip(state))]
pub async fn get_questions(
    State(state): State<Arc<AppState>>,
    Path(course): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    state
        .bank
        .course_json(&course)
        .map(|questions| Json(questions.to_vec()))
        .ok_or_else(|| ApiError::not_found("Course not found"))
}

#[instrument(skip_all)]
pub async fn submit(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Submission>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(submission) = body.map_err(|e| {
        tracing::debug!("rejected submission body: {e}");
        ApiError::bad_request("Invalid submission").with_details(e.body_text())
    })?;

    let questions = submission.validate(&state.bank)?;
    let result = state.engine.calculate_results(&submission.answers, questions);

    if let Some(email) = submission.email() {
        let update = SubmissionUpdate {
            email: normalize_email(email),
            name: submission.name.clone().unwrap_or_default(),
            course: submission.course.trim().to_string(),
            answers: submission.answers.clone(),
            result: result.clone(),
        };
        state.store.upsert_submission(update).await.map_err(|e| {
            tracing::error!("error saving results: {e}");
            ApiError::internal("Failed to calculate results")
        })?;
    }

    tracing::info!(
        course = %submission.course,
        learning_style = %result.learning_style,
        "scored submission"
    );
    Ok(Json(json!({ "result": result })))
}

pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let users = state.store.list().await.map_err(|e| {
        tracing::error!("failed to fetch users: {e}");
        ApiError::internal("Failed to fetch users")
    })?;
    Ok(Json(json!({ "users": users })))
}

pub async fn list_results(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let records = state.store.list_with_results().await.map_err(|e| {
        tracing::error!("failed to fetch results: {e}");
        ApiError::internal("Failed to fetch users")
    })?;
    let users: Vec<ResultSummary> = records.iter().filter_map(ResultSummary::from_record).collect();
    Ok(Json(json!({ "users": users })))
}

#[derive(Debug, Deserialize)]
pub struct EmailParams {
    #[serde(default)]
    pub email: Option<String>,
}

pub async fn validate_email(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EmailParams>,
) -> Result<Json<Value>, ApiError> {
    let email = params
        .email
        .as_deref()
        .map(normalize_email)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("Email is required"))?;

    let exists = state
        .store
        .find_by_email(&email)
        .await
        .map_err(|e| {
            tracing::error!("failed to validate email: {e}");
            ApiError::internal("Failed to validate email")
        })?
        .is_some();
    Ok(Json(json!({ "exists": exists })))
}

#[instrument(skip_all)]
pub async fn register_email(
    State(state): State<Arc<AppState>>,
    body: Result<Json<EmailParams>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let email = body
        .ok()
        .and_then(|Json(params)| params.email)
        .unwrap_or_default();

    let user = registration::register_email(state.store.as_ref(), &email).await?;
    Ok(Json(json!({ "success": true, "user": user })))
}

#[derive(Debug, Deserialize)]
struct EmailBatch {
    emails: Vec<String>,
}

/// Register a batch of emails from the request body, or from the configured
/// emails file when the body is empty.
#[instrument(skip_all)]
pub async fn register_emails(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<RegistrationSummary>, ApiError> {
    let emails = if body.iter().all(u8::is_ascii_whitespace) {
        let path = state
            .emails_path
            .as_deref()
            .ok_or_else(|| ApiError::bad_request("No emails provided"))?;
        read_emails_file(path).await?
    } else {
        let batch: EmailBatch = serde_json::from_slice(&body)
            .map_err(|e| ApiError::bad_request("emails must be an array").with_details(e))?;
        batch.emails
    };

    let summary = registration::register_emails(state.store.as_ref(), &emails[..])
        .await
        .map_err(|e| {
            tracing::error!("failed to register emails: {e}");
            ApiError::internal("Failed to register emails").with_details(e)
        })?;
    Ok(Json(summary))
}

async fn read_emails_file(path: &FsPath) -> Result<Vec<String>, ApiError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        tracing::error!(path = %path.display(), "failed to read emails file: {e}");
        ApiError::internal("Failed to register emails").with_details(e)
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|e| {
        tracing::error!(path = %path.display(), "failed to parse emails file: {e}");
        ApiError::internal("Failed to register emails").with_details(e)
    })?;

    let Value::Array(items) = value else {
        return Err(ApiError::bad_request("emails.json must be an array"));
    };
    Ok(items
        .into_iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use quizscore_core::model::QuestionBank;
    use quizscore_core::scoring::ScoringEngine;
    use quizscore_core::store::{MemoryStore, RecordStore};
    use tower::ServiceExt;

    const BANK: &str = r#"{
        "backend": [
            {"text": "q1", "trait": "problemSolving", "options": [{"label": "0", "value": 0}, {"label": "3", "value": 3}]},
            {"text": "q2", "trait": "problemSolving", "options": [{"label": "0", "value": 0}, {"label": "3", "value": 3}]}
        ]
    }"#;

    fn state() -> (Arc<AppState>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let bank: QuestionBank = serde_json::from_str(BANK).unwrap();
        let state = AppState::new(ScoringEngine::default(), bank, store.clone());
        (Arc::new(state), store)
    }

    fn router(state: Arc<AppState>) -> Router {
        crate::app(state)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn root_reports_running() {
        let (state, _) = state();
        let response = router(state).oneshot(get("/")).await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"Personality Quiz API is running.");
    }

    #[tokio::test]
    async fn questions_for_known_and_unknown_course() {
        let (state, _) = state();
        let (status, body) = send(router(state.clone()), get("/api/quiz/questions/backend")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["trait"], "problemSolving");

        let (status, body) = send(router(state), get("/api/quiz/questions/frontend")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Course not found");
    }

    #[tokio::test]
    async fn questions_are_served_as_written() {
        let course = json!([{
            "question": "Q?",
            "category": "learning",
            "trait": "openness",
            "options": [{"text": "Yes", "value": 3}]
        }]);
        let bank: QuestionBank = serde_json::from_value(json!({ "general": course })).unwrap();
        let state = Arc::new(AppState::new(
            ScoringEngine::default(),
            bank,
            Arc::new(MemoryStore::new()),
        ));

        let (status, body) = send(router(state), get("/api/quiz/questions/general")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, course);
    }

    #[tokio::test]
    async fn cors_preflight_allows_any_origin() {
        let (state, _) = state();
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/quiz/submit")
            .header("origin", "http://quiz.example.com")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "content-type")
            .body(Body::empty())
            .unwrap();

        let response = router(state).oneshot(request).await.unwrap();
        assert!(response.status().is_success());
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert!(headers.contains_key("access-control-allow-methods"));
    }

    #[tokio::test]
    async fn cors_header_on_plain_requests() {
        let (state, _) = state();
        let request = Request::get("/api/quiz/questions/backend")
            .header("origin", "http://quiz.example.com")
            .body(Body::empty())
            .unwrap();
        let response = router(state).oneshot(request).await.unwrap();
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn submit_scores_and_saves() {
        let (state, store) = state();
        let (status, body) = send(
            router(state),
            post_json(
                "/api/quiz/submit",
                json!({"name": "Ada", "email": " Ada@X.io ", "course": "backend", "answers": [3, 3]}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["traits"]["problemSolving"], 100);
        assert_eq!(body["result"]["composites"]["technicalAptitude"], 40);

        let saved = store.find_by_email("ada@x.io").await.unwrap().unwrap();
        assert_eq!(saved.name, "Ada");
        assert_eq!(saved.course, "backend");
        assert!(saved.result.is_some());
    }

    #[tokio::test]
    async fn submit_without_email_is_not_saved() {
        let (state, store) = state();
        let (status, _) = send(
            router(state),
            post_json("/api/quiz/submit", json!({"course": "backend", "answers": [1, null]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_rejects_bad_input() {
        let (state, _) = state();

        let (status, body) = send(
            router(state.clone()),
            post_json("/api/quiz/submit", json!({"course": "backend", "answers": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid submission");

        let (status, _) = send(
            router(state.clone()),
            post_json("/api/quiz/submit", json!({"course": "backend", "answers": [3]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            router(state),
            post_json("/api/quiz/submit", json!({"course": "frontend", "answers": []})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Course not found");
    }

    #[tokio::test]
    async fn users_and_results_listing() {
        let (state, _) = state();
        send(
            router(state.clone()),
            post_json("/api/quiz/register-email", json!({"email": "blank@x.io"})),
        )
        .await;
        send(
            router(state.clone()),
            post_json(
                "/api/quiz/submit",
                json!({"name": "S", "email": "scored@x.io", "course": "backend", "answers": [1, 2]}),
            ),
        )
        .await;

        let (_, users) = send(router(state.clone()), get("/api/quiz/users")).await;
        assert_eq!(users["users"].as_array().unwrap().len(), 2);

        let (_, results) = send(router(state), get("/api/quiz/results")).await;
        let results = results["users"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["email"], "scored@x.io");
        assert!(results[0].get("answers").is_none());
    }

    #[tokio::test]
    async fn validate_email_lookup() {
        let (state, _) = state();
        let (status, _) = send(router(state.clone()), get("/api/quiz/validate-email")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        send(
            router(state.clone()),
            post_json("/api/quiz/register-email", json!({"email": "a@x.io"})),
        )
        .await;
        let (_, body) = send(router(state.clone()), get("/api/quiz/validate-email?email=A@x.io")).await;
        assert_eq!(body["exists"], true);
        let (_, body) = send(router(state), get("/api/quiz/validate-email?email=b@x.io")).await;
        assert_eq!(body["exists"], false);
    }

    #[tokio::test]
    async fn register_email_rejects_duplicates_and_blanks() {
        let (state, _) = state();
        let (status, body) = send(
            router(state.clone()),
            post_json("/api/quiz/register-email", json!({"email": "a@x.io"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["email"], "a@x.io");

        let (status, body) = send(
            router(state.clone()),
            post_json("/api/quiz/register-email", json!({"email": "A@x.io"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Email already registered");

        let (status, body) = send(
            router(state),
            post_json("/api/quiz/register-email", json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Email is required");
    }

    #[tokio::test]
    async fn register_emails_from_body() {
        let (state, _) = state();
        let (status, body) = send(
            router(state.clone()),
            post_json(
                "/api/quiz/register-emails",
                json!({"emails": ["a@x.io", "b@x.io", "A@x.io"]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"created": 2, "skipped": 0, "failed": 0}));

        let (_, body) = send(
            router(state),
            post_json("/api/quiz/register-emails", json!({"emails": ["a@x.io", "c@x.io"]})),
        )
        .await;
        assert_eq!(body, json!({"created": 1, "skipped": 1, "failed": 0}));
    }

    #[tokio::test]
    async fn register_emails_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emails.json");
        std::fs::write(&path, r#"["x@y.io", " X@Y.io", "z@y.io"]"#).unwrap();

        let store = Arc::new(MemoryStore::new());
        let bank: QuestionBank = serde_json::from_str(BANK).unwrap();
        let state = Arc::new(
            AppState::new(ScoringEngine::default(), bank, store).with_emails_path(path.clone()),
        );

        let request = Request::post("/api/quiz/register-emails")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router(state.clone()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["created"], 2);

        std::fs::write(&path, r#"{"emails": []}"#).unwrap();
        let request = Request::post("/api/quiz/register-emails")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router(state), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "emails.json must be an array");
    }
}
