//! Runtime configuration.
//!
//! Everything is read once from the environment (optionally seeded from a
//! `.env` file) and then passed explicitly to the components that need it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use url::Url;
use validator::Validate;

use crate::brain::likert::QuestionnaireConfig;
use crate::error::AppError;

pub const DEFAULT_REMOTE_BASE_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_REMOTE_MODEL: &str = "mistralai/mistral-7b-instruct";
pub const DEFAULT_ANALYSIS_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_SUGGESTION_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the remote language model.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RemoteConfig {
    #[validate(length(min = 1))]
    pub api_key: String,
    /// Chat-completions endpoint.
    #[validate(length(min = 1))]
    pub base_url: String,
    #[validate(length(min = 1))]
    pub model: String,
    /// Sent as `HTTP-Referer`.
    pub referer: String,
    /// Sent as `X-Title`.
    pub title: String,
    #[validate(range(min = 0.0, max = 2.0))]
    pub analysis_temperature: f32,
    #[validate(range(min = 0.0, max = 2.0))]
    pub suggestion_temperature: f32,
}

impl RemoteConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_REMOTE_BASE_URL.to_string(),
            model: DEFAULT_REMOTE_MODEL.to_string(),
            referer: "http://localhost:3000".to_string(),
            title: "Soul-Link".to_string(),
            analysis_temperature: 0.3,
            suggestion_temperature: 0.7,
        }
    }

    /// Field checks plus a parseable base URL.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()
            .map_err(|e| AppError::Config(format!("Invalid remote settings: {}", e)))?;
        Url::parse(&self.base_url)?;
        Ok(())
    }
}

/// Output format of the log subscriber installed by the binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One bunyan JSON object per line.
    Bunyan,
}

impl LogFormat {
    /// Reads `LOG_FORMAT`; unset means `Pretty`.
    pub fn from_env() -> Result<Self, AppError> {
        match non_empty_var("LOG_FORMAT").map(|v| v.to_lowercase()).as_deref() {
            None | Some("pretty") => Ok(LogFormat::Pretty),
            Some("bunyan") | Some("json") => Ok(LogFormat::Bunyan),
            Some(other) => Err(AppError::Config(format!(
                "LOG_FORMAT must be 'pretty' or 'bunyan', got '{}'",
                other
            ))),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root data directory; the session database lives inside it.
    pub data_dir: PathBuf,
    /// `None` disables every remote call.
    pub remote: Option<RemoteConfig>,
    pub analysis_timeout: Duration,
    pub suggestion_timeout: Duration,
    pub questionnaire: QuestionnaireConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            remote: None,
            analysis_timeout: DEFAULT_ANALYSIS_TIMEOUT,
            suggestion_timeout: DEFAULT_SUGGESTION_TIMEOUT,
            questionnaire: QuestionnaireConfig::default(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn seconds_var(key: &str, default: Duration) -> Result<Duration, AppError> {
    match non_empty_var(key) {
        Some(raw) => raw
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| AppError::Config(format!("{} must be a positive integer, got '{}'", key, raw))),
        None => Ok(default),
    }
}

/// Parses a comma-separated list of zero-based question positions.
pub fn parse_reversed_items(raw: &str) -> Result<BTreeSet<usize>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<usize>().map_err(|_| {
                AppError::Config(format!("Invalid questionnaire item index '{}'", item))
            })
        })
        .collect()
}

impl AppConfig {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_vars()
    }

    /// Reads the process environment only.
    pub fn from_vars() -> Result<Self, AppError> {
        let data_dir = non_empty_var("DATA_FOLDER")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data"));

        let remote = match non_empty_var("MISTRAL_API_KEY") {
            Some(api_key) => {
                let mut remote = RemoteConfig::new(api_key);
                if let Some(base_url) = non_empty_var("REMOTE_BASE_URL") {
                    remote.base_url = base_url;
                }
                if let Some(model) = non_empty_var("REMOTE_MODEL") {
                    remote.model = model;
                }
                remote.check()?;
                Some(remote)
            }
            None => None,
        };

        let questionnaire = match non_empty_var("LIKERT_REVERSED_ITEMS") {
            Some(raw) => QuestionnaireConfig {
                reversed_items: parse_reversed_items(&raw)?,
            },
            None => QuestionnaireConfig::default(),
        };

        let config = Self {
            data_dir,
            remote,
            analysis_timeout: seconds_var("ANALYSIS_TIMEOUT_SECS", DEFAULT_ANALYSIS_TIMEOUT)?,
            suggestion_timeout: seconds_var("SUGGESTION_TIMEOUT_SECS", DEFAULT_SUGGESTION_TIMEOUT)?,
            questionnaire,
        };

        info!(
            "Configuration loaded: data_dir={:?}, remote={}",
            config.data_dir,
            config.ai_provider()
        );
        Ok(config)
    }

    /// Human-readable name of the active suggestion provider.
    pub fn ai_provider(&self) -> &'static str {
        if self.remote.is_some() {
            "Remote language model"
        } else {
            "Rule-based fallback"
        }
    }
}
