//! Explicit runtime configuration.
//!
//! # Responsibility
//! - Resolve storage, logging, aggregation and assistant settings once.
//! - Reject malformed values instead of silently falling back.
//!
//! # Invariants
//! - Unset or blank variables use documented defaults.
//! - The API key is never rendered by `Debug`.

use crate::logging::default_log_level;
use crate::service::progress_service::DEFAULT_EXERCISE_REFERENCE_KCAL;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "WELLNESS_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "WELLNESS_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "WELLNESS_LOG_DIR";
pub const ENV_EXERCISE_REFERENCE_KCAL: &str = "WELLNESS_EXERCISE_REFERENCE_KCAL";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_ASSISTANT_MODEL: &str = "WELLNESS_ASSISTANT_MODEL";
pub const ENV_ASSISTANT_BASE_URL: &str = "WELLNESS_ASSISTANT_BASE_URL";
pub const ENV_ASSISTANT_TIMEOUT_SECS: &str = "WELLNESS_ASSISTANT_TIMEOUT_SECS";

pub const DEFAULT_DB_FILE_NAME: &str = "wellness.sqlite3";
pub const DEFAULT_ASSISTANT_MODEL: &str = "gpt-4o";
pub const DEFAULT_ASSISTANT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_ASSISTANT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ASSISTANT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_ASSISTANT_TEMPERATURE: f32 = 0.7;

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "invalid {key} `{value}`; expected {expected}"),
        }
    }
}

impl Error for ConfigError {}

/// Settings of the external text-generation service.
#[derive(Clone, PartialEq)]
pub struct AssistantConfig {
    /// `None` leaves the assistant unconfigured; chat then answers with the
    /// generic failure message.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_ASSISTANT_MODEL.to_string(),
            base_url: DEFAULT_ASSISTANT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_ASSISTANT_TIMEOUT_SECS,
            max_tokens: DEFAULT_ASSISTANT_MAX_TOKENS,
            temperature: DEFAULT_ASSISTANT_TEMPERATURE,
        }
    }
}

impl Debug for AssistantConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Top-level configuration handed to [`crate::context::AppContext`].
#[derive(Debug, Clone, PartialEq)]
pub struct WellnessConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling logs; `None` leaves logging to the host.
    pub log_dir: Option<PathBuf>,
    pub exercise_reference_kcal: i64,
    pub assistant: AssistantConfig,
}

impl Default for WellnessConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            exercise_reference_kcal: DEFAULT_EXERCISE_REFERENCE_KCAL,
            assistant: AssistantConfig::default(),
        }
    }
}

impl WellnessConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level.to_ascii_lowercase();
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = read(ENV_EXERCISE_REFERENCE_KCAL) {
            config.exercise_reference_kcal = raw
                .parse::<i64>()
                .ok()
                .filter(|kcal| *kcal > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: ENV_EXERCISE_REFERENCE_KCAL,
                    value: raw,
                    expected: "a positive integer",
                })?;
        }

        config.assistant.api_key = read(ENV_OPENAI_API_KEY);
        if let Some(model) = read(ENV_ASSISTANT_MODEL) {
            config.assistant.model = model;
        }
        if let Some(base_url) = read(ENV_ASSISTANT_BASE_URL) {
            config.assistant.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = read(ENV_ASSISTANT_TIMEOUT_SECS) {
            config.assistant.timeout_secs = raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: ENV_ASSISTANT_TIMEOUT_SECS,
                    value: raw,
                    expected: "a positive number of seconds",
                })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, WellnessConfig, ENV_ASSISTANT_TIMEOUT_SECS};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = WellnessConfig::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(config.exercise_reference_kcal, 500);
        assert_eq!(config.assistant.model, "gpt-4o");
        assert_eq!(config.assistant.timeout_secs, 30);
        assert_eq!(config.assistant.api_key, None);
        assert!(config.db_path.ends_with("wellness.sqlite3"));
    }

    #[test]
    fn overrides_are_trimmed_and_applied() {
        let config = WellnessConfig::from_lookup(lookup(&[
            ("WELLNESS_DB_PATH", " /data/w.sqlite3 "),
            ("WELLNESS_EXERCISE_REFERENCE_KCAL", "650"),
            ("WELLNESS_ASSISTANT_BASE_URL", "http://localhost:8080/v1/"),
            ("OPENAI_API_KEY", "  "),
        ]))
        .expect("valid overrides");
        assert_eq!(config.db_path, PathBuf::from("/data/w.sqlite3"));
        assert_eq!(config.exercise_reference_kcal, 650);
        assert_eq!(config.assistant.base_url, "http://localhost:8080/v1");
        assert_eq!(config.assistant.api_key, None);
    }

    #[test]
    fn malformed_timeout_is_rejected() {
        let err = WellnessConfig::from_lookup(lookup(&[(ENV_ASSISTANT_TIMEOUT_SECS, "soon")]))
            .expect_err("timeout must be numeric");
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: ENV_ASSISTANT_TIMEOUT_SECS,
                ..
            }
        ));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = WellnessConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-secret")]))
            .expect("valid key");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
