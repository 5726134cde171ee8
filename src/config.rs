use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const CONFIG_FILE: &str = "config.json";
pub const CONFIG_VERSION: u32 = 1;

/// Which tasks must be finished before a task may be completed, beyond its
/// own dependencies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionRule {
    /// A task cannot complete while any task depending on it is pending.
    #[default]
    DependentsFirst,
    /// Only the task's own dependencies gate completion.
    PrerequisitesOnly,
}

impl std::fmt::Display for CompletionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DependentsFirst => write!(f, "dependents_first"),
            Self::PrerequisitesOnly => write!(f, "prerequisites_only"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub version: u32,
    #[serde(default)]
    pub completion_rule: CompletionRule,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            completion_rule: CompletionRule::default(),
        }
    }
}

impl Config {
    /// Read `config.json` from `dir`, writing the defaults first if it does
    /// not exist yet.
    pub fn load_or_init(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            let config = Self::default();
            fs::write(&path, serde_json::to_string_pretty(&config)?)?;
            return Ok(config);
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_config_is_written_with_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_or_init(dir.path()).unwrap();
        assert_eq!(config.completion_rule, CompletionRule::DependentsFirst);

        let written = fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        assert!(written.contains(r#""completion_rule": "dependents_first""#));
    }

    #[test]
    fn existing_config_selects_rule() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"version": 1, "completion_rule": "prerequisites_only"}"#,
        )
        .unwrap();
        let config = Config::load_or_init(dir.path()).unwrap();
        assert_eq!(config.completion_rule, CompletionRule::PrerequisitesOnly);
    }

    #[test]
    fn rule_defaults_when_field_absent() {
        let config: Config = serde_json::from_str(r#"{"version": 1}"#).unwrap();
        assert_eq!(config.completion_rule, CompletionRule::DependentsFirst);
    }

    #[test]
    fn unparseable_config_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{not json").unwrap();
        assert!(Config::load_or_init(dir.path()).is_err());
    }
}
