//! quizscore-client: HTTP client for a running quizscore server.
//!
//! Used by the CLI to push participant emails to the bulk registration
//! endpoint in batches.

pub mod error;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use quizscore_core::record::dedupe_emails;
use quizscore_core::registration::{chunk_emails, RegistrationSummary};

pub use error::ClientError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the quiz API.
#[derive(Debug, Clone)]
pub struct QuizClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct EmailBatch<'a> {
    emails: &'a [String],
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: String,
    #[serde(default)]
    details: Option<String>,
}

impl QuizClient {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:4000`).
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Send one batch to `POST /api/quiz/register-emails`.
    #[instrument(skip(self, batch), fields(size = batch.len()))]
    pub async fn register_emails(&self, batch: &[String]) -> Result<RegistrationSummary, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/quiz/register-emails", self.base_url))
            .json(&EmailBatch { emails: batch })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    ClientError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| match e.details {
                    Some(details) => format!("{}: {details}", e.error),
                    None => e.error,
                })
                .unwrap_or(body);
            return Err(ClientError::Api { status, message });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Deduplicate `emails`, split them into batches of `batch_size`, and send
    /// the batches one after another. The first failing batch aborts the upload.
    pub async fn upload_emails<S: AsRef<str>>(
        &self,
        emails: &[S],
        batch_size: usize,
    ) -> Result<RegistrationSummary, ClientError> {
        let unique = dedupe_emails(emails);
        let batches = chunk_emails(&unique, batch_size);
        let mut total = RegistrationSummary::default();

        for (i, batch) in batches.iter().enumerate() {
            let summary = self.register_emails(batch).await?;
            tracing::info!(
                batch = i + 1,
                of = batches.len(),
                created = summary.created,
                skipped = summary.skipped,
                failed = summary.failed,
                "uploaded batch"
            );
            total += summary;
        }
        Ok(total)
    }
}
