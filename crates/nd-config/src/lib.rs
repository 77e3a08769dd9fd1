//! # nd-config
//!
//! Layered configuration for the newsdesk binary: built-in defaults, then an
//! optional TOML file, then `NEWSDESK__*` environment variables
//! (e.g. `NEWSDESK__STORAGE__DATA_DIR=/var/lib/newsdesk`).

use config::{Config, Environment, File};
use nd_core::{ArticleDefaults, EventContext, StoreLimits, StoreOptions};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File read when no explicit path is given. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "newsdesk.toml";
pub const ENV_PREFIX: &str = "NEWSDESK";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Memory,
    #[default]
    Files,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: Backend,
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Files,
            data_dir: PathBuf::from("./data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_articles: usize,
    pub max_comments: usize,
    pub max_events: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        let limits = StoreLimits::default();
        Self {
            max_articles: limits.max_articles,
            max_comments: limits.max_comments,
            max_events: limits.max_events,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub source: String,
    pub image: String,
    pub category: String,
    pub author: String,
    pub duplicate_suffix: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let defaults = ArticleDefaults::default();
        Self {
            source: defaults.source,
            image: defaults.image,
            category: defaults.category,
            author: defaults.author,
            duplicate_suffix: defaults.duplicate_suffix,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Feed document written by `sync` and read back by the loader
    pub shared_file: PathBuf,
    pub local_data: PathBuf,
    pub api_url: Option<String>,
    pub api_token: Option<SecretString>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            shared_file: PathBuf::from("cms-news.json"),
            local_data: PathBuf::from("data.json"),
            api_url: None,
            api_token: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub limits: LimitsConfig,
    pub defaults: DefaultsConfig,
    pub feed: FeedConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads `.env`, then `path` (or `newsdesk.toml`), then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Ok(env_file) = dotenvy::dotenv() {
            debug!(path = %env_file.display(), "loaded .env");
        }
        let required = path.is_some();
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Self::from_sources(path, required, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    fn from_sources(file: &Path, required: bool, env: Environment) -> Result<Self, ConfigError> {
        let config: AppConfig = Config::builder()
            .add_source(File::from(file).required(required))
            .add_source(env)
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.limits;
        for (name, value) in [
            ("max_articles", limits.max_articles),
            ("max_comments", limits.max_comments),
            ("max_events", limits.max_events),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("limits.{name} must be positive")));
            }
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.level is empty".to_string()));
        }
        if let Some(api_url) = &self.feed.api_url {
            url::Url::parse(api_url)
                .map_err(|e| ConfigError::Invalid(format!("feed.api_url: {e}")))?;
        }
        Ok(())
    }

    pub fn store_options(&self) -> StoreOptions {
        let d = &self.defaults;
        StoreOptions {
            limits: StoreLimits {
                max_articles: self.limits.max_articles,
                max_comments: self.limits.max_comments,
                max_events: self.limits.max_events,
            },
            defaults: ArticleDefaults {
                source: d.source.clone(),
                image: d.image.clone(),
                url: ArticleDefaults::default().url,
                category: d.category.clone(),
                author: d.author.clone(),
                duplicate_suffix: d.duplicate_suffix.clone(),
            },
            event_context: EventContext::default(),
            seed_welcome: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::environment().source(Some(map))
    }

    #[test]
    fn defaults_without_any_source() {
        let config =
            AppConfig::from_sources(Path::new("does-not-exist.toml"), false, env(&[])).unwrap();
        assert_eq!(config.storage.backend, Backend::Files);
        assert_eq!(config.limits.max_articles, 10_000);
        assert_eq!(config.defaults.source, "ELONCE");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.feed.api_token.is_none());
    }

    #[test]
    fn file_then_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("newsdesk.toml");
        std::fs::write(
            &path,
            "[storage]\nbackend = \"memory\"\n\n[limits]\nmax_articles = 50\n\n[logging]\nformat = \"json\"\n",
        )
        .unwrap();

        let config = AppConfig::from_sources(
            &path,
            true,
            env(&[("NEWSDESK__LIMITS__MAX_ARTICLES", "7"), ("NEWSDESK__DEFAULTS__SOURCE", "Elonce TV")]),
        )
        .unwrap();

        assert_eq!(config.storage.backend, Backend::Memory);
        assert_eq!(config.limits.max_articles, 7);
        assert_eq!(config.defaults.source, "Elonce TV");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.store_options().limits.max_articles, 7);
    }

    #[test]
    fn zero_limit_is_rejected() {
        let result = AppConfig::from_sources(
            Path::new("does-not-exist.toml"),
            false,
            env(&[("NEWSDESK__LIMITS__MAX_EVENTS", "0")]),
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::from_sources(Path::new("nope/newsdesk.toml"), true, env(&[]));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
