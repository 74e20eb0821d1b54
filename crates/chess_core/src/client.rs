//! HTTP client for the Chess.com public API

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, de::DeserializeOwned};
use std::fmt;
use tracing::{debug, error, warn};

use crate::{
    config::ChessApiConfig,
    error::{ChessApiError, Result},
    models::{PlayerClubs, PlayerDailyGames, PlayerStats},
    username::PlayerIdentity,
};

/// Longest upstream error body echoed back in an error message
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Player resources exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Stats,
    Clubs,
    DailyGames,
}

impl Resource {
    /// Final path segment of the endpoint
    pub fn path(&self) -> &'static str {
        match self {
            Self::Stats => "stats",
            Self::Clubs => "clubs",
            Self::DailyGames => "games",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stats => write!(f, "stats"),
            Self::Clubs => write!(f, "clubs"),
            Self::DailyGames => write!(f, "daily games"),
        }
    }
}

/// Read-only player lookups.
///
/// Every method takes the username as supplied by the caller, rejects blank
/// input before touching the network, and returns `Ok(None)` when the API
/// answers 404.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChessApi: Send + Sync {
    async fn player_stats(&self, username: &str) -> Result<Option<PlayerStats>>;

    async fn player_clubs(&self, username: &str) -> Result<Option<PlayerClubs>>;

    async fn player_daily_games(&self, username: &str) -> Result<Option<PlayerDailyGames>>;
}

/// [`ChessApi`] backed by reqwest.
#[derive(Debug, Clone)]
pub struct ChessClient {
    http: reqwest::Client,
    base_url: Url,
    config: ChessApiConfig,
}

impl ChessClient {
    pub fn new(config: ChessApiConfig) -> Result<Self> {
        debug!(
            base_url = %config.api_base_url,
            timeout = ?config.timeout(),
            "Creating Chess.com API client"
        );

        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| invalid_base_url(&config.api_base_url, e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid_base_url(
                &config.api_base_url,
                "URL cannot carry a path".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .map_err(|cause| ChessApiError::ClientBuild { cause })?;

        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    pub fn config(&self) -> &ChessApiConfig {
        &self.config
    }

    /// Player names are appended as a single percent-encoded path segment.
    fn endpoint(&self, player: &PlayerIdentity, resource: Resource) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                invalid_base_url(&self.config.api_base_url, "URL cannot carry a path".to_string())
            })?
            .pop_if_empty()
            .extend(["player", player.as_str(), resource.path()]);
        Ok(url)
    }

    async fn fetch<T>(&self, username: &str, resource: Resource) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        let player = PlayerIdentity::parse(username)?;
        debug!(username = %player, %resource, "Fetching chess player data");

        let mut attempt = 0;
        loop {
            match self.fetch_once(&player, resource).await {
                Ok(Some(data)) => {
                    debug!(username = %player, %resource, "Successfully fetched chess player data");
                    return Ok(Some(data));
                }
                Ok(None) => {
                    warn!("Chess player '{}' not found", player);
                    return Ok(None);
                }
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = self
                        .config
                        .retry_backoff()
                        .saturating_mul(2u32.saturating_pow(attempt));
                    attempt += 1;
                    warn!(
                        username = %player,
                        %resource,
                        attempt,
                        max_retries = self.config.max_retries,
                        ?delay,
                        "Retrying after error: {}",
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    error!("Error fetching {} for user {}: {}", resource, player, e);
                    return Err(e);
                }
            }
        }
    }

    async fn fetch_once<T>(&self, player: &PlayerIdentity, resource: Resource) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(player, resource)?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(player, resource, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            // The body only adds detail; a failure to read it must not mask the status.
            let body = self
                .read_body(player, resource, response)
                .await
                .unwrap_or_default();
            return Err(ChessApiError::Upstream {
                username: player.to_string(),
                resource,
                status: status.as_u16(),
                message: upstream_message(status, &body),
            });
        }

        let body = self.read_body(player, resource, response).await?;
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|cause| ChessApiError::Deserialization {
                username: player.to_string(),
                resource,
                cause,
            })
    }

    /// Buffer the body, refusing anything over `max_response_bytes`.
    async fn read_body(
        &self,
        player: &PlayerIdentity,
        resource: Resource,
        mut response: reqwest::Response,
    ) -> Result<Vec<u8>> {
        let limit = self.config.max_response_bytes;
        let too_large = || ChessApiError::ResponseTooLarge {
            username: player.to_string(),
            resource,
            limit,
        };

        if response
            .content_length()
            .is_some_and(|len| len > limit as u64)
        {
            return Err(too_large());
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.transport_error(player, resource, e))?
        {
            if body.len() + chunk.len() > limit {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }

    fn transport_error(
        &self,
        player: &PlayerIdentity,
        resource: Resource,
        cause: reqwest::Error,
    ) -> ChessApiError {
        if cause.is_timeout() {
            ChessApiError::Timeout {
                username: player.to_string(),
                resource,
                timeout: self.config.timeout(),
            }
        } else {
            ChessApiError::Transport {
                username: player.to_string(),
                resource,
                cause,
            }
        }
    }
}

#[async_trait]
impl ChessApi for ChessClient {
    async fn player_stats(&self, username: &str) -> Result<Option<PlayerStats>> {
        self.fetch(username, Resource::Stats).await
    }

    async fn player_clubs(&self, username: &str) -> Result<Option<PlayerClubs>> {
        self.fetch(username, Resource::Clubs).await
    }

    async fn player_daily_games(&self, username: &str) -> Result<Option<PlayerDailyGames>> {
        self.fetch(username, Resource::DailyGames).await
    }
}

fn invalid_base_url(url: &str, reason: String) -> ChessApiError {
    ChessApiError::InvalidBaseUrl {
        url: url.to_string(),
        reason,
    }
}

/// Chess.com error bodies look like `{"code": 0, "message": "..."}`.
#[derive(Deserialize)]
struct UpstreamErrorBody {
    message: Option<String>,
}

fn upstream_message(status: StatusCode, body: &[u8]) -> String {
    let reason = status.canonical_reason().unwrap_or("Unknown Status");

    let detail = match serde_json::from_slice::<UpstreamErrorBody>(body) {
        Ok(UpstreamErrorBody {
            message: Some(message),
        }) => message,
        _ => String::from_utf8_lossy(body).trim().to_string(),
    };

    if detail.is_empty() {
        reason.to_string()
    } else {
        let detail: String = detail.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{reason} - {detail}")
    }
}
