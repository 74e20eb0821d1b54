//! Chess.com API client configuration

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Settings for [`ChessClient`](crate::client::ChessClient), built once at
/// startup and passed to the client by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessApiConfig {
    /// Base URL for the Chess.com public API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Maximum retries for timeouts, connection failures and 429/5xx responses
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry; doubles on each further attempt
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Largest response body the client will buffer
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for ChessApiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

impl ChessApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Apply `CHESS_*` overrides from the given variable lookup.
    ///
    /// Unparseable numeric values are rejected rather than silently ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CHESS_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(agent) = lookup("CHESS_USER_AGENT") {
            self.user_agent = agent;
        }
        if let Some(value) = lookup("CHESS_TIMEOUT_SECONDS") {
            self.timeout_seconds = parse_env("CHESS_TIMEOUT_SECONDS", &value)?;
        }
        if let Some(value) = lookup("CHESS_MAX_RETRIES") {
            self.max_retries = parse_env("CHESS_MAX_RETRIES", &value)?;
        }
        if let Some(value) = lookup("CHESS_RETRY_BACKOFF_MS") {
            self.retry_backoff_ms = parse_env("CHESS_RETRY_BACKOFF_MS", &value)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.api_base_url.trim().is_empty() {
            errors.push(ValidationError {
                field: "chess.api_base_url".to_string(),
                message: "API base URL cannot be empty".to_string(),
            });
        } else if !(self.api_base_url.starts_with("http://")
            || self.api_base_url.starts_with("https://"))
        {
            errors.push(ValidationError {
                field: "chess.api_base_url".to_string(),
                message: format!("'{}' is not an http(s) URL", self.api_base_url),
            });
        }

        if self.user_agent.trim().is_empty() {
            errors.push(ValidationError {
                field: "chess.user_agent".to_string(),
                message: "User agent cannot be empty".to_string(),
            });
        }

        if self.timeout_seconds == 0 {
            errors.push(ValidationError {
                field: "chess.timeout_seconds".to_string(),
                message: "Timeout must be at least one second".to_string(),
            });
        }

        if self.max_response_bytes == 0 {
            errors.push(ValidationError {
                field: "chess.max_response_bytes".to_string(),
                message: "Response size limit must be positive".to_string(),
            });
        }

        if !errors.is_empty() {
            return Err(ConfigError::ValidationFailed { errors });
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(var_name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnvVar {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected: "a non-negative integer".to_string(),
        })
}

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed: {}", errors.iter().map(|e| format!("{}: {}", e.field, e.message)).collect::<Vec<_>>().join("; "))]
    #[diagnostic(code(chess_core::config::validation_failed))]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Invalid value '{value}' for environment variable {var_name}")]
    #[diagnostic(
        code(chess_core::config::invalid_env_var),
        help("Set {var_name} to {expected}")
    )]
    InvalidEnvVar {
        var_name: String,
        value: String,
        /// Human-readable description of an accepted value
        expected: String,
    },
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

// Default value functions
fn default_api_base_url() -> String {
    "https://api.chess.com/pub".to_string()
}

fn default_user_agent() -> String {
    "Chess MCP Server 1.0".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_max_response_bytes() -> usize {
    1024 * 1024
}
