//! The `quizscore init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("quizscore.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("data")?;
    write_if_missing(Path::new("data/questions.json"), SAMPLE_QUESTIONS)?;

    println!("\nNext steps:");
    println!("  1. Edit data/questions.json with your courses");
    println!("  2. Run: quizscore validate");
    println!("  3. Run: quizscore serve");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizscore configuration

port = 4000
questions_path = "data/questions.json"
emails_path = "data/emails.json"
store_path = "data/users.json"
api_url = "http://localhost:4000"
batch_size = 100

# Per-trait weights inside each composite score (0.0 to 1.0).
# [weights]
# problemSolving = 0.4
# teamOrientation = 0.4
"#;

const SAMPLE_QUESTIONS: &str = r#"{
  "general": [
    {
      "id": "g1",
      "text": "I enjoy exploring ideas that are new to me.",
      "trait": "openness",
      "options": [
        { "label": "Strongly disagree", "value": 1 },
        { "label": "Disagree", "value": 2 },
        { "label": "Neutral", "value": 3 },
        { "label": "Agree", "value": 4 },
        { "label": "Strongly agree", "value": 5 }
      ]
    },
    {
      "id": "g2",
      "text": "I believe my abilities improve with effort.",
      "trait": "growthMindset",
      "options": [
        { "label": "Strongly disagree", "value": 1 },
        { "label": "Disagree", "value": 2 },
        { "label": "Neutral", "value": 3 },
        { "label": "Agree", "value": 4 },
        { "label": "Strongly agree", "value": 5 }
      ]
    },
    {
      "id": "g3",
      "text": "I set aside regular time to study.",
      "trait": "learningCommitment",
      "options": [
        { "label": "Strongly disagree", "value": 1 },
        { "label": "Disagree", "value": 2 },
        { "label": "Neutral", "value": 3 },
        { "label": "Agree", "value": 4 },
        { "label": "Strongly agree", "value": 5 }
      ]
    },
    {
      "id": "g4",
      "text": "I am confident I can learn difficult material.",
      "trait": "selfEfficacy",
      "options": [
        { "label": "Strongly disagree", "value": 1 },
        { "label": "Disagree", "value": 2 },
        { "label": "Neutral", "value": 3 },
        { "label": "Agree", "value": 4 },
        { "label": "Strongly agree", "value": 5 }
      ]
    },
    {
      "id": "g5",
      "text": "I like breaking hard problems into smaller steps.",
      "trait": "problemSolving",
      "options": [
        { "label": "Strongly disagree", "value": 1 },
        { "label": "Disagree", "value": 2 },
        { "label": "Neutral", "value": 3 },
        { "label": "Agree", "value": 4 },
        { "label": "Strongly agree", "value": 5 }
      ]
    },
    {
      "id": "g6",
      "text": "I double-check my work before handing it in.",
      "trait": "attentionToDetail",
      "options": [
        { "label": "Strongly disagree", "value": 1 },
        { "label": "Disagree", "value": 2 },
        { "label": "Neutral", "value": 3 },
        { "label": "Agree", "value": 4 },
        { "label": "Strongly agree", "value": 5 }
      ]
    },
    {
      "id": "g7",
      "text": "I keep going when a task gets frustrating.",
      "trait": "persistence",
      "options": [
        { "label": "Strongly disagree", "value": 1 },
        { "label": "Disagree", "value": 2 },
        { "label": "Neutral", "value": 3 },
        { "label": "Agree", "value": 4 },
        { "label": "Strongly agree", "value": 5 }
      ]
    },
    {
      "id": "g8",
      "text": "I find it easy to get along with others.",
      "trait": "agreeableness",
      "options": [
        { "label": "Strongly disagree", "value": 1 },
        { "label": "Disagree", "value": 2 },
        { "label": "Neutral", "value": 3 },
        { "label": "Agree", "value": 4 },
        { "label": "Strongly agree", "value": 5 }
      ]
    },
    {
      "id": "g9",
      "text": "I prefer working on problems with a team.",
      "trait": "teamOrientation",
      "options": [
        { "label": "Strongly disagree", "value": 1 },
        { "label": "Disagree", "value": 2 },
        { "label": "Neutral", "value": 3 },
        { "label": "Agree", "value": 4 },
        { "label": "Strongly agree", "value": 5 }
      ]
    },
    {
      "id": "g10",
      "text": "I welcome criticism of my work.",
      "trait": "feedbackOrientation",
      "options": [
        { "label": "Strongly disagree", "value": 1 },
        { "label": "Disagree", "value": 2 },
        { "label": "Neutral", "value": 3 },
        { "label": "Agree", "value": 4 },
        { "label": "Strongly agree", "value": 5 }
      ]
    },
    {
      "id": "g11",
      "text": "I adapt quickly when plans change.",
      "trait": "cognitiveFlexibility",
      "options": [
        { "label": "Strongly disagree", "value": 1 },
        { "label": "Disagree", "value": 2 },
        { "label": "Neutral", "value": 3 },
        { "label": "Agree", "value": 4 },
        { "label": "Strongly agree", "value": 5 }
      ]
    },
    {
      "id": "g12",
      "text": "I look for evidence before drawing conclusions.",
      "trait": "analyticalThinking",
      "options": [
        { "label": "Strongly disagree", "value": 1 },
        { "label": "Disagree", "value": 2 },
        { "label": "Neutral", "value": 3 },
        { "label": "Agree", "value": 4 },
        { "label": "Strongly agree", "value": 5 }
      ]
    },
    {
      "id": "g13",
      "text": "I like to understand how software works under the hood.",
      "trait": "technicalCuriosity",
      "options": [
        { "label": "Strongly disagree", "value": 1 },
        { "label": "Disagree", "value": 2 },
        { "label": "Neutral", "value": 3 },
        { "label": "Agree", "value": 4 },
        { "label": "Strongly agree", "value": 5 }
      ]
    },
    {
      "id": "g14",
      "text": "I help resolve disagreements in a group.",
      "trait": "conflictResolution",
      "options": [
        { "label": "Strongly disagree", "value": 1 },
        { "label": "Disagree", "value": 2 },
        { "label": "Neutral", "value": 3 },
        { "label": "Agree", "value": 4 },
        { "label": "Strongly agree", "value": 5 }
      ]
    }
  ]
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use quizscore_core::bank::{parse_question_bank_str, validate_bank};

    #[test]
    fn sample_questions_cover_every_trait() {
        let bank = parse_question_bank_str(SAMPLE_QUESTIONS, Path::new("questions.json")).unwrap();
        assert_eq!(bank.course("general").map(<[_]>::len), Some(14));
        assert!(validate_bank(&bank).is_empty());
    }

    #[test]
    fn sample_config_parses() {
        let config: crate::config::AppConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.port, 4000);
        assert!(config.trait_weights().is_ok());
    }
}
