//! Application configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizscore_core::registration::DEFAULT_BATCH_SIZE;
use quizscore_core::TraitWeights;

/// Top-level quizscore configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Port the API server listens on.
    pub port: u16,
    /// Question bank JSON file.
    pub questions_path: PathBuf,
    /// Emails file used by bulk registration and `upload-emails`.
    pub emails_path: PathBuf,
    /// Record store JSON file.
    pub store_path: PathBuf,
    /// Base URL of a running server, for `upload-emails`.
    pub api_url: String,
    /// Emails per upload request.
    pub batch_size: usize,
    /// Per-trait weight overrides keyed by trait wire name.
    pub weights: BTreeMap<String, f64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 4000,
            questions_path: PathBuf::from("data/questions.json"),
            emails_path: PathBuf::from("data/emails.json"),
            store_path: PathBuf::from("data/users.json"),
            api_url: "http://localhost:4000".to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            weights: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    /// The scoring weights after applying overrides.
    pub fn trait_weights(&self) -> Result<TraitWeights> {
        TraitWeights::with_overrides(&self.weights).context("invalid [weights] table")
    }

    fn resolve_env_vars(&mut self) {
        self.questions_path = resolve_path(&self.questions_path);
        self.emails_path = resolve_path(&self.emails_path);
        self.store_path = resolve_path(&self.store_path);
        self.api_url = resolve_env_vars(&self.api_url);
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("PORT") {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("invalid PORT: {port}"))?;
        }
        if let Ok(store) = std::env::var("QUIZSCORE_STORE") {
            self.store_path = PathBuf::from(store);
        }
        Ok(())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
/// Unset variables expand to nothing. Substituted values are not expanded
/// again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `quizscore.toml` in the current directory
/// 2. `~/.config/quizscore/config.toml`
///
/// Environment overrides `PORT` and `QUIZSCORE_STORE` apply last.
pub fn load_config_from(path: Option<&Path>) -> Result<AppConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("quizscore.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => AppConfig::default(),
    };

    config.apply_env_overrides()?;
    Ok(config)
}

fn parse_config(content: &str) -> Result<AppConfig> {
    let mut config: AppConfig = toml::from_str(content)?;
    config.resolve_env_vars();
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizscore"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizscore_core::Trait;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZSCORE_TEST_VAR", "data");
        assert_eq!(resolve_env_vars("${_QUIZSCORE_TEST_VAR}"), "data");
        assert_eq!(
            resolve_env_vars("/srv/${_QUIZSCORE_TEST_VAR}/users.json"),
            "/srv/data/users.json"
        );
        assert_eq!(resolve_env_vars("${_QUIZSCORE_UNSET_VAR}x"), "x");
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_QUIZSCORE_TEST_VAR");
    }

    #[test]
    fn substituted_values_are_not_expanded_again() {
        std::env::set_var("_QUIZSCORE_SELF_REF", "${_QUIZSCORE_SELF_REF}");
        std::env::set_var("_QUIZSCORE_INNER", "x");
        assert_eq!(
            resolve_env_vars("a/${_QUIZSCORE_SELF_REF}/b"),
            "a/${_QUIZSCORE_SELF_REF}/b"
        );
        assert_eq!(
            resolve_env_vars("${_QUIZSCORE_INNER}${_QUIZSCORE_INNER}"),
            "xx"
        );
        std::env::remove_var("_QUIZSCORE_SELF_REF");
        std::env::remove_var("_QUIZSCORE_INNER");
    }

    #[test]
    fn default_config() {
        let config = AppConfig::default();
        assert_eq!(config.port, 4000);
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.store_path, PathBuf::from("data/users.json"));
        assert!(config.weights.is_empty());
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config(
            r#"
port = 8080
api_url = "http://quiz.internal:8080"

[weights]
problemSolving = 0.5
"#,
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.questions_path, PathBuf::from("data/questions.json"));

        let weights = config.trait_weights().unwrap();
        assert_eq!(weights.get(Trait::ProblemSolving), 0.5);
        assert_eq!(weights.get(Trait::Persistence), 0.3);
    }

    #[test]
    fn invalid_weights_are_rejected() {
        let config = parse_config("[weights]\ngrit = 0.5\n").unwrap();
        let err = config.trait_weights().unwrap_err();
        assert!(format!("{err:#}").contains("grit"));
    }

    #[test]
    fn explicit_missing_config_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/quizscore.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_config_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "batch_size = 25\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.batch_size, 25);
    }
}
