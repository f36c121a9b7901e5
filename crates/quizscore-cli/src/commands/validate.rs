//! The `quizscore validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizscore_core::bank::{load_question_bank, validate_bank};

use crate::config::load_config_from;

pub fn execute(questions_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let path = questions_path.unwrap_or(config.questions_path);
    let bank = load_question_bank(&path)?;

    for (course, questions) in bank.iter() {
        println!("Course: {course} ({} questions)", questions.len());
    }

    let warnings = validate_bank(&bank);
    for w in &warnings {
        let location = match w.question_index {
            Some(i) => format!("  [{}#{}]", w.course, i + 1),
            None => format!("  [{}]", w.course),
        };
        println!("{location} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
