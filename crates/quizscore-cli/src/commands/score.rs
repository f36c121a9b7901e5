//! The `quizscore score` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quizscore_core::bank::load_question_bank;
use quizscore_core::submission::Submission;
use quizscore_core::{Answer, AssessmentResult, Composite, ScoringEngine, Trait};

use crate::config::load_config_from;

pub fn execute(
    course: String,
    answers_path: PathBuf,
    questions_path: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = load_question_bank(questions_path.as_deref().unwrap_or(&config.questions_path))?;
    let engine = ScoringEngine::new(config.trait_weights()?);

    let submission = Submission {
        name: None,
        email: None,
        course,
        answers: load_answers(&answers_path)?,
    };
    let questions = submission
        .validate(&bank)
        .with_context(|| format!("cannot score {}", answers_path.display()))?;
    let result = engine.calculate_results(&submission.answers, questions);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        "table" => print_result(&result),
        other => anyhow::bail!("unknown format: {other} (expected json or table)"),
    }
    Ok(())
}

/// Read a JSON array of answers. Non-numeric entries are unanswered.
fn load_answers(path: &Path) -> Result<Vec<Answer>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers: {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers: {}", path.display()))?;
    let serde_json::Value::Array(items) = value else {
        anyhow::bail!("answers file must be a JSON array: {}", path.display());
    };
    Ok(items.iter().map(serde_json::Value::as_f64).collect())
}

fn print_result(result: &AssessmentResult) {
    use comfy_table::{Cell, Table};

    let mut traits = Table::new();
    traits.set_header(vec!["Trait", "Score"]);
    for (t, score) in result.traits.iter() {
        traits.add_row(vec![Cell::new(t), Cell::new(score)]);
    }
    println!("{traits}");

    let mut composites = Table::new();
    composites.set_header(vec!["Composite", "Score"]);
    for c in Composite::ALL {
        composites.add_row(vec![Cell::new(c), Cell::new(result.composites.get(c))]);
    }
    println!("\n{composites}");

    println!("\nLearning style:    {}", result.learning_style);
    println!("Strength areas:    {}", area_list(&result.recommendation.strength_areas));
    println!("Development areas: {}", area_list(&result.recommendation.development_areas));
}

fn area_list(areas: &[Trait]) -> String {
    areas.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
}
