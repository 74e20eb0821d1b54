//! Configuration module for the Chess MCP server
//!
//! Loads settings from a TOML file and applies environment variable
//! overrides. A missing file is not an error: every setting has a default.

use chess_core::{ChessApiConfig, ConfigError, ValidationError};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::error::{Result, ServerError};

const CONFIG_FILE_NAME: &str = "chess-mcp.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Chess.com API client settings
    #[serde(default)]
    pub chess: ChessApiConfig,

    /// MCP transport settings
    #[serde(default)]
    pub mcp: McpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// MCP transport type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum McpTransport {
    #[default]
    Stdio,
    Http,
}

impl fmt::Display for McpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            McpTransport::Stdio => write!(f, "stdio"),
            McpTransport::Http => write!(f, "http"),
        }
    }
}

impl FromStr for McpTransport {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stdio" => Ok(McpTransport::Stdio),
            "http" => Ok(McpTransport::Http),
            _ => Err(format!("Unknown MCP transport: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpConfig {
    #[serde(default)]
    pub transport: McpTransport,

    /// Bind address for the HTTP transport
    #[serde(default = "default_mcp_host")]
    pub host: String,

    /// Port for the HTTP transport
    #[serde(default = "default_mcp_port")]
    pub port: u16,
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            transport: McpTransport::default(),
            host: default_mcp_host(),
            port: default_mcp_port(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Daily-rolling log file, in addition to stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file and apply environment overrides.
    ///
    /// The result is not validated yet: command-line overrides still have to
    /// be applied, after which the caller runs [`Config::validate`].
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ServerError::ConfigReadFailed {
                    path: path.to_path_buf(),
                    cause: e,
                })?;

        let mut config = Self::from_toml(&content, path)?;
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for when no file exists
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// First existing file among [`Config::search_paths`]
    pub async fn find_default() -> Option<PathBuf> {
        for path in Self::search_paths() {
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                return Some(path);
            }
        }
        None
    }

    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("config").join(CONFIG_FILE_NAME),
        ];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("chess-mcp").join(CONFIG_FILE_NAME));
        }
        paths
    }

    pub fn from_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| ServerError::ConfigParseFailed {
            path: path.to_path_buf(),
            cause: e,
        })
    }

    /// Apply `CHESS_*` and `CHESS_MCP_*` overrides from the given lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> std::result::Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.chess.apply_env_overrides(&lookup)?;

        if let Some(value) = lookup("CHESS_MCP_TRANSPORT") {
            self.mcp.transport = value.parse().map_err(|_| ConfigError::InvalidEnvVar {
                var_name: "CHESS_MCP_TRANSPORT".to_string(),
                value,
                expected: "one of: stdio, http".to_string(),
            })?;
        }
        if let Some(host) = lookup("CHESS_MCP_HOST") {
            self.mcp.host = host;
        }
        if let Some(value) = lookup("CHESS_MCP_PORT") {
            self.mcp.port = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnvVar {
                    var_name: "CHESS_MCP_PORT".to_string(),
                    value,
                    expected: "a port number between 0 and 65535".to_string(),
                })?;
        }

        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let mut errors = match self.chess.validate() {
            Ok(()) => Vec::new(),
            Err(ConfigError::ValidationFailed { errors }) => errors,
            Err(other) => return Err(other),
        };

        if self.mcp.transport == McpTransport::Http && self.mcp.host.trim().is_empty() {
            errors.push(ValidationError {
                field: "mcp.host".to_string(),
                message: "HTTP transport requires a bind host".to_string(),
            });
        }

        if self.logging.level.trim().is_empty() {
            errors.push(ValidationError {
                field: "logging.level".to_string(),
                message: "Log level cannot be empty".to_string(),
            });
        }

        if !errors.is_empty() {
            return Err(ConfigError::ValidationFailed { errors });
        }

        Ok(())
    }
}

// Default value functions
fn default_mcp_host() -> String {
    "127.0.0.1".to_string()
}

fn default_mcp_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}
