//! Application configuration, read from TOML with environment overrides.

use crate::links::Destination;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const CONFIG_PATH_ENV: &str = "PROMPT_BUILDER_CONFIG";
pub const DATA_DIR_ENV: &str = "PROMPT_BUILDER_DATA_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub feedback: FeedbackConfig,
    pub destinations: Vec<Destination>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the archive document
    pub data_dir: PathBuf,
    /// Fixed storage key; the document is `<data_dir>/<key>.json`
    pub key: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FeedbackConfig {
    pub deletion_undo_secs: u64,
    pub copied_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            feedback: FeedbackConfig::default(),
            destinations: Destination::defaults(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".prompt-builder"),
            key: "prompt-builder-snapshots".to_string(),
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            deletion_undo_secs: 10,
            copied_secs: 2,
        }
    }
}

impl FeedbackConfig {
    pub fn deletion_undo(&self) -> Duration {
        Duration::from_secs(self.deletion_undo_secs)
    }

    pub fn copied(&self) -> Duration {
        Duration::from_secs(self.copied_secs)
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `.env`, then the file named by `PROMPT_BUILDER_CONFIG` (or
    /// `explicit`, which wins). No file means defaults.
    /// `PROMPT_BUILDER_DATA_DIR` overrides the storage directory.
    pub fn from_env(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            config.storage.data_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage key must not be empty".into()));
        }
        if self.feedback.deletion_undo_secs == 0 || self.feedback.copied_secs == 0 {
            return Err(ConfigError::Invalid("feedback durations must be > 0".into()));
        }
        for dest in &self.destinations {
            Url::parse(&dest.base_url).map_err(|e| {
                ConfigError::Invalid(format!("destination {}: {}", dest.name, e))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.feedback.deletion_undo(), Duration::from_secs(10));
        assert_eq!(config.feedback.copied(), Duration::from_secs(2));
        assert_eq!(config.destinations.len(), 4);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config = Config::parse(
            r#"
            [storage]
            data_dir = "/tmp/prompts"

            [[destinations]]
            name = "local"
            base_url = "http://localhost:3000/chat"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/prompts"));
        assert_eq!(config.storage.key, "prompt-builder-snapshots");
        assert_eq!(config.feedback.copied_secs, 2);
        assert_eq!(config.destinations.len(), 1);
        assert_eq!(config.destinations[0].query_param, "q");
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            Config::parse("[storage]\nkey = \"  \""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("[feedback]\ncopied_secs = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("[[destinations]]\nname = \"x\"\nbase_url = \"nope\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(Config::parse("storage = 3"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prompt-builder.toml");
        std::fs::write(&path, "[feedback]\ndeletion_undo_secs = 30\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.feedback.deletion_undo_secs, 30);

        let missing = Config::load(dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }

    // Only test touching these variables, so the mutation cannot race.
    #[test]
    fn environment_overrides_apply() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("archive");
        std::env::remove_var(CONFIG_PATH_ENV);
        std::env::set_var(DATA_DIR_ENV, &data_dir);

        let defaults = Config::from_env(None).unwrap();
        assert_eq!(defaults.storage.data_dir, data_dir);
        assert_eq!(defaults.storage.key, "prompt-builder-snapshots");
        assert_eq!(defaults.feedback, FeedbackConfig::default());

        let path = dir.path().join("explicit.toml");
        std::fs::write(
            &path,
            "[storage]\ndata_dir = \"/ignored\"\nkey = \"mine\"\n[feedback]\ncopied_secs = 5\n",
        )
        .unwrap();
        let explicit = Config::from_env(Some(path.as_path())).unwrap();
        assert_eq!(explicit.storage.key, "mine");
        assert_eq!(explicit.feedback.copied_secs, 5);
        assert_eq!(explicit.storage.data_dir, data_dir);

        let from_var = dir.path().join("from-var.toml");
        std::fs::write(&from_var, "[storage]\nkey = \"via-env\"\n").unwrap();
        std::env::set_var(CONFIG_PATH_ENV, &from_var);
        let via_env = Config::from_env(None).unwrap();
        assert_eq!(via_env.storage.key, "via-env");
        assert_eq!(Config::from_env(Some(path.as_path())).unwrap().storage.key, "mine");

        std::env::remove_var(CONFIG_PATH_ENV);
        std::env::remove_var(DATA_DIR_ENV);
    }
}
