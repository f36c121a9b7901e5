//! The `quizscore upload-emails` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizscore_client::QuizClient;

use crate::config::load_config_from;

pub async fn execute(
    file: Option<PathBuf>,
    api_url: Option<String>,
    batch_size: Option<usize>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let path = file.unwrap_or(config.emails_path);
    let api_url = api_url.unwrap_or(config.api_url);
    let batch_size = batch_size.unwrap_or(config.batch_size);

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read emails: {}", path.display()))?;
    let emails: Vec<String> = serde_json::from_str(&content)
        .with_context(|| format!("emails file must be a JSON array of strings: {}", path.display()))?;

    println!("Uploading {} email(s) to {api_url}", emails.len());
    let client = QuizClient::new(&api_url)?;
    let summary = client
        .upload_emails(&emails, batch_size)
        .await
        .context("email upload failed")?;

    println!(
        "Created: {}, skipped: {}, failed: {}",
        summary.created, summary.skipped, summary.failed
    );
    Ok(())
}
