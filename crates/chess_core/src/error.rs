use miette::Diagnostic;
use thiserror::Error;

use crate::client::Resource;

/// Errors produced by the Chess.com API client.
///
/// A missing player (HTTP 404) is not an error; the client reports it as
/// `Ok(None)`.
#[derive(Error, Diagnostic, Debug)]
pub enum ChessApiError {
    #[error("Username cannot be null or empty")]
    #[diagnostic(
        code(chess_core::invalid_username),
        help("Provide a Chess.com username such as 'hikaru'")
    )]
    InvalidUsername,

    #[error("Username '{username}' cannot be used as a request path segment")]
    #[diagnostic(
        code(chess_core::unaddressable_username),
        help("'.' and '..' are path navigation, not Chess.com usernames")
    )]
    UnaddressableUsername { username: String },

    #[error("Failed to fetch chess player {resource} for '{username}': {status} {message}")]
    #[diagnostic(
        code(chess_core::upstream_error),
        help("The Chess.com API rejected the request")
    )]
    Upstream {
        username: String,
        resource: Resource,
        status: u16,
        message: String,
    },

    #[error("Timed out fetching chess player {resource} for '{username}' after {timeout:?}")]
    #[diagnostic(
        code(chess_core::timeout),
        help("Increase chess.timeout_seconds or check network connectivity")
    )]
    Timeout {
        username: String,
        resource: Resource,
        timeout: std::time::Duration,
    },

    #[error("Failed to fetch chess player {resource} for '{username}': {cause}")]
    #[diagnostic(
        code(chess_core::transport_error),
        help("Check network connectivity and the configured API base URL")
    )]
    Transport {
        username: String,
        resource: Resource,
        #[source]
        cause: reqwest::Error,
    },

    #[error("Failed to parse chess player {resource} for '{username}': {cause}")]
    #[diagnostic(code(chess_core::deserialization_failed))]
    Deserialization {
        username: String,
        resource: Resource,
        #[source]
        cause: serde_json::Error,
    },

    #[error(
        "Response for chess player {resource} of '{username}' exceeds the {limit} byte limit"
    )]
    #[diagnostic(
        code(chess_core::response_too_large),
        help("Raise chess.max_response_bytes if this payload is expected")
    )]
    ResponseTooLarge {
        username: String,
        resource: Resource,
        limit: usize,
    },

    #[error("Invalid API base URL '{url}': {reason}")]
    #[diagnostic(
        code(chess_core::invalid_base_url),
        help("Set chess.api_base_url to an absolute http(s) URL such as https://api.chess.com/pub")
    )]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client")]
    #[diagnostic(code(chess_core::client_build_failed))]
    ClientBuild {
        #[source]
        cause: reqwest::Error,
    },
}

/// Coarse classification of [`ChessApiError`], inspected at the tool boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChessErrorKind {
    InvalidInput,
    Upstream,
    Transport,
}

impl ChessApiError {
    pub fn kind(&self) -> ChessErrorKind {
        match self {
            Self::InvalidUsername | Self::UnaddressableUsername { .. } => {
                ChessErrorKind::InvalidInput
            }
            Self::Upstream { .. } => ChessErrorKind::Upstream,
            Self::Timeout { .. }
            | Self::Transport { .. }
            | Self::Deserialization { .. }
            | Self::ResponseTooLarge { .. }
            | Self::InvalidBaseUrl { .. }
            | Self::ClientBuild { .. } => ChessErrorKind::Transport,
        }
    }

    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Transport { cause, .. } => cause.is_connect() || cause.is_request(),
            Self::Upstream { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChessApiError>;
