//! The `quizscore results` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizscore_core::store::RecordStore;
use quizscore_store::JsonFileStore;

use crate::config::load_config_from;

pub async fn execute(store_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let path = store_path.unwrap_or(config.store_path);
    let store = JsonFileStore::open(&path).await?;

    let records = store.list_with_results().await?;
    if records.is_empty() {
        println!("No results recorded yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Name",
        "Email",
        "Course",
        "Learning style",
        "Strengths",
        "Submitted",
    ]);

    for record in &records {
        let Some(result) = &record.result else {
            continue;
        };
        let strengths = result
            .recommendation
            .strength_areas
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(&record.name),
            Cell::new(&record.email),
            Cell::new(&record.course),
            Cell::new(result.learning_style),
            Cell::new(strengths),
            Cell::new(record.created_at.format("%Y-%m-%d %H:%M")),
        ]);
    }

    println!("{table}");
    println!("{} result(s).", records.len());
    Ok(())
}
