//! Startup settings
//!
//! Every binary loads [`Settings`] exactly once, before any agent is built.
//! A missing API key is fatal; everything else has a default.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable overriding the API base URL
pub const API_BASE_ENV: &str = "OPENAI_API_BASE";
/// Environment variable overriding the default model
pub const MODEL_ENV: &str = "OPENAI_MODEL";
/// HTTP request timeout, in seconds
pub const REQUEST_TIMEOUT_ENV: &str = "CONCIERGE_REQUEST_TIMEOUT_SECS";
/// Per-query timeout, in seconds
pub const QUERY_TIMEOUT_ENV: &str = "CONCIERGE_QUERY_TIMEOUT_SECS";
/// Maximum model calls per query
pub const MAX_TURNS_ENV: &str = "CONCIERGE_MAX_TURNS";
/// Abort the batch on the first failing query
pub const FAIL_FAST_ENV: &str = "CONCIERGE_FAIL_FAST";

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_TURNS: usize = 10;

/// Errors raised while loading settings
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is absent or blank
    #[error("{0} is not set. Please configure it in your environment or .env file.")]
    MissingVar(&'static str),

    /// A variable is present but cannot be parsed
    #[error("Invalid value for {var}: {reason}")]
    Invalid {
        /// Variable name
        var: &'static str,
        /// What went wrong
        reason: String,
    },
}

/// How a batch of queries reacts to a failing query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Log the failure and continue with the next query
    #[default]
    Isolate,
    /// Stop the batch at the first failure
    FailFast,
}

/// Validated startup settings
#[derive(Clone)]
pub struct Settings {
    /// API credential
    pub api_key: String,
    /// Base URL of the OpenAI-compatible API
    pub api_base: String,
    /// Model used by agents that do not name one
    pub model: String,
    /// HTTP timeout for a single model call
    pub request_timeout: Duration,
    /// Optional timeout for a whole query (all turns and tool calls)
    pub query_timeout: Option<Duration>,
    /// Maximum number of model calls per query
    pub max_turns: usize,
    /// Batch failure policy
    pub failure_mode: FailureMode,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .field("query_timeout", &self.query_timeout)
            .field("max_turns", &self.max_turns)
            .field("failure_mode", &self.failure_mode)
            .finish()
    }
}

impl Settings {
    /// Load settings from the process environment
    ///
    /// A `.env` file in the working directory (or a parent) is loaded first
    /// if one exists; real environment variables take precedence.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings from a map, mainly for tests
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_ENV).ok_or(ConfigError::MissingVar(API_KEY_ENV))?;

        let request_timeout = match get(REQUEST_TIMEOUT_ENV) {
            Some(raw) => Duration::from_secs(parse_positive(REQUEST_TIMEOUT_ENV, &raw)?),
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let query_timeout = get(QUERY_TIMEOUT_ENV)
            .map(|raw| parse_positive(QUERY_TIMEOUT_ENV, &raw).map(Duration::from_secs))
            .transpose()?;

        let max_turns = match get(MAX_TURNS_ENV) {
            Some(raw) => parse_positive(MAX_TURNS_ENV, &raw)? as usize,
            None => DEFAULT_MAX_TURNS,
        };

        let failure_mode = match get(FAIL_FAST_ENV) {
            Some(raw) if parse_bool(FAIL_FAST_ENV, &raw)? => FailureMode::FailFast,
            _ => FailureMode::Isolate,
        };

        Ok(Self {
            api_key: api_key.trim().to_string(),
            api_base: get(API_BASE_ENV).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model: get(MODEL_ENV).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            request_timeout,
            query_timeout,
            max_turns,
            failure_mode,
        })
    }
}

fn parse_positive(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            var,
            reason: "must be greater than 0".to_string(),
        }),
        Ok(n) => Ok(n),
        Err(e) => Err(ConfigError::Invalid {
            var,
            reason: format!("'{raw}' is not a whole number ({e})"),
        }),
    }
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            reason: format!("'{raw}' is not a boolean"),
        }),
    }
}
