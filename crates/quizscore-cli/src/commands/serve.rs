//! The `quizscore serve` command.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;

use quizscore_core::bank::load_question_bank;
use quizscore_core::ScoringEngine;
use quizscore_server::AppState;

use crate::config::load_config_from;

pub async fn execute(config_path: Option<PathBuf>, port: Option<u16>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let port = port.unwrap_or(config.port);

    let engine = ScoringEngine::new(config.trait_weights()?);
    let bank = load_question_bank(&config.questions_path)?;
    let store = quizscore_store::open_store(&config.store_path).await?;

    let state = AppState::new(engine, bank, store).with_emails_path(config.emails_path.clone());
    quizscore_server::serve(state, SocketAddr::from(([0, 0, 0, 0], port))).await
}
