//! quizscore-server: HTTP API over the scoring engine and record store.
//!
//! Serves course questions, scores submitted answers, and manages
//! participant records keyed by email.

pub mod error;
pub mod handlers;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use quizscore_core::model::QuestionBank;
use quizscore_core::scoring::ScoringEngine;
use quizscore_core::store::RecordStore;

pub use error::ApiError;

/// Shared state for every request.
pub struct AppState {
    pub engine: ScoringEngine,
    pub bank: QuestionBank,
    pub store: Arc<dyn RecordStore>,
    /// File read by bulk registration when the request carries no emails.
    pub emails_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(engine: ScoringEngine, bank: QuestionBank, store: Arc<dyn RecordStore>) -> Self {
        Self {
            engine,
            bank,
            store,
            emails_path: None,
        }
    }

    pub fn with_emails_path(mut self, path: PathBuf) -> Self {
        self.emails_path = Some(path);
        self
    }
}

/// Routes under `/api/quiz`.
pub fn quiz_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/questions/{course}", get(handlers::get_questions))
        .route("/submit", post(handlers::submit))
        .route("/users", get(handlers::list_users))
        .route("/results", get(handlers::list_results))
        .route("/validate-email", get(handlers::validate_email))
        .route("/register-email", post(handlers::register_email))
        .route("/register-emails", post(handlers::register_emails))
}

/// The full application router. Any origin may call the API.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .nest("/api/quiz", quiz_router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr()?;

    tracing::info!(
        courses = state.bank.len(),
        "server listening on http://{local}"
    );

    axum::serve(listener, app(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
