//! Agent-facing player lookups.
//!
//! Each operation delegates to a [`ChessApi`], folds every outcome into a
//! [`ToolResult`] and never returns an error to the caller.

pub mod summary;

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use tracing::{error, info, warn};

use crate::{
    client::{ChessApi, ChessClient},
    error::{ChessApiError, ChessErrorKind},
    models::{PlayerClubs, PlayerDailyGames, PlayerStats},
};

pub const NO_STATS_FOUND: &str = "No statistics found for this player";

/// Outcome of a single tool call.
///
/// `success` is true exactly when `error` is absent, and `summary` is only
/// set alongside `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult<T> {
    /// Username as supplied by the caller
    pub username: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl<T> ToolResult<T> {
    pub fn success(username: impl Into<String>, data: T, summary: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            success: true,
            error: None,
            data: Some(data),
            summary: Some(summary.into()),
        }
    }

    pub fn failure(username: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            success: false,
            error: Some(error.into()),
            data: None,
            summary: None,
        }
    }
}

/// The three Chess.com lookups exposed to agents.
#[derive(Clone)]
pub struct ChessTools {
    api: Arc<dyn ChessApi>,
}

impl fmt::Debug for ChessTools {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChessTools").finish_non_exhaustive()
    }
}

impl ChessTools {
    pub fn new(api: Arc<dyn ChessApi>) -> Self {
        Self { api }
    }

    pub fn with_client(client: ChessClient) -> Self {
        Self::new(Arc::new(client))
    }

    pub async fn player_stats(&self, username: Option<&str>) -> ToolResult<PlayerStats> {
        let username = username.unwrap_or_default();
        info!("Getting chess stats for player: {}", username);

        match self.api.player_stats(username).await {
            Ok(Some(stats)) => {
                let summary = summary::stats_summary(username, &stats);
                ToolResult::success(username, stats, summary)
            }
            Ok(None) => {
                warn!("No chess statistics found for player: {}", username);
                ToolResult::failure(username, NO_STATS_FOUND)
            }
            Err(e) => failure(username, "Failed to fetch chess statistics", e),
        }
    }

    pub async fn player_clubs(&self, username: Option<&str>) -> ToolResult<PlayerClubs> {
        let username = username.unwrap_or_default();
        info!("Getting chess clubs for player: {}", username);

        match self.api.player_clubs(username).await {
            Ok(clubs) => {
                // Unknown players and players without clubs read the same.
                let clubs = clubs.unwrap_or_default();
                let summary = summary::clubs_summary(username, &clubs, &Local);
                ToolResult::success(username, clubs, summary)
            }
            Err(e) => failure(username, "Failed to fetch chess clubs", e),
        }
    }

    pub async fn player_daily_games(&self, username: Option<&str>) -> ToolResult<PlayerDailyGames> {
        let username = username.unwrap_or_default();
        info!("Getting daily chess games for player: {}", username);

        match self.api.player_daily_games(username).await {
            Ok(games) => {
                let games = games.unwrap_or_default();
                let summary = summary::daily_games_summary(username, &games, &Local);
                ToolResult::success(username, games, summary)
            }
            Err(e) => failure(username, "Failed to fetch chess daily games", e),
        }
    }
}

fn failure<T>(username: &str, context: &str, e: ChessApiError) -> ToolResult<T> {
    match e.kind() {
        ChessErrorKind::InvalidInput => {
            warn!("Invalid username provided: {}", e);
            ToolResult::failure(username, format!("Invalid username: {e}"))
        }
        ChessErrorKind::Upstream | ChessErrorKind::Transport => {
            error!("{} for player {}: {}", context, username, e);
            ToolResult::failure(username, format!("{context}: {e}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::{MockChessApi, Resource},
        config::ChessApiConfig,
        models::{ClubMembership, DailyGame, GameRecord, GameStats, Rating},
    };
    use pretty_assertions::assert_eq;

    fn rapid_stats() -> PlayerStats {
        PlayerStats {
            chess_rapid: Some(GameStats {
                last: Some(Rating {
                    rating: 1500,
                    date: 1_700_000_000,
                    rd: None,
                }),
                best: None,
                record: Some(GameRecord {
                    win: 10,
                    loss: 5,
                    draw: 2,
                    ..GameRecord::default()
                }),
            }),
            ..PlayerStats::default()
        }
    }

    fn tools(mock: MockChessApi) -> ChessTools {
        ChessTools::new(Arc::new(mock))
    }

    fn assert_invariants<T>(result: &ToolResult<T>) {
        assert_eq!(result.success, result.error.is_none());
        if result.summary.is_some() {
            assert!(result.success && result.data.is_some());
        }
    }

    #[tokio::test]
    async fn test_stats_success() {
        let mut mock = MockChessApi::new();
        mock.expect_player_stats()
            .times(1)
            .returning(|_| Ok(Some(rapid_stats())));

        let result = tools(mock).player_stats(Some("hikaru")).await;

        assert_invariants(&result);
        assert!(result.success);
        assert_eq!(result.username, "hikaru");
        assert_eq!(result.data, Some(rapid_stats()));
        let summary = result.summary.unwrap();
        assert!(summary.starts_with("Chess Player Statistics Summary for hikaru:"));
        assert!(summary.contains("Rapid: 1500 (W:10 L:5 D:2)"));
    }

    #[tokio::test]
    async fn test_stats_not_found() {
        let mut mock = MockChessApi::new();
        mock.expect_player_stats().returning(|_| Ok(None));

        let result = tools(mock).player_stats(Some("ghost")).await;

        assert_invariants(&result);
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some(NO_STATS_FOUND));
        assert!(result.data.is_none());
        assert!(result.summary.is_none());
    }

    #[tokio::test]
    async fn test_clubs_and_games_not_found_read_as_empty() {
        let mut mock = MockChessApi::new();
        mock.expect_player_clubs().returning(|_| Ok(None));
        mock.expect_player_daily_games().returning(|_| Ok(None));
        let tools = tools(mock);

        let clubs = tools.player_clubs(Some("ghost")).await;
        assert_invariants(&clubs);
        assert!(clubs.success);
        assert_eq!(clubs.data, Some(PlayerClubs::default()));
        assert_eq!(clubs.summary.as_deref(), Some(summary::NO_CLUBS_SUMMARY));

        let games = tools.player_daily_games(Some("ghost")).await;
        assert_invariants(&games);
        assert!(games.success);
        assert_eq!(games.data, Some(PlayerDailyGames::default()));
        assert_eq!(
            games.summary.as_deref(),
            Some(summary::NO_DAILY_GAMES_SUMMARY)
        );
    }

    #[tokio::test]
    async fn test_clubs_and_games_success() {
        let clubs = PlayerClubs {
            clubs: vec![ClubMembership {
                id: "https://api.chess.com/pub/club/team-usa".to_string(),
                name: "Team USA".to_string(),
                joined: 1_500_000_000,
                last_activity: 1_700_000_000,
                ..ClubMembership::default()
            }],
        };
        let games = PlayerDailyGames {
            games: vec![DailyGame {
                white: Some("https://api.chess.com/pub/player/alice".to_string()),
                black: Some("https://api.chess.com/pub/player/bob".to_string()),
                turn: Some("black".to_string()),
                time_control: Some("1/86400".to_string()),
                ..DailyGame::default()
            }],
        };

        let mut mock = MockChessApi::new();
        let returned_clubs = clubs.clone();
        mock.expect_player_clubs()
            .times(1)
            .returning(move |_| Ok(Some(returned_clubs.clone())));
        let returned_games = games.clone();
        mock.expect_player_daily_games()
            .times(1)
            .returning(move |_| Ok(Some(returned_games.clone())));
        let tools = tools(mock);

        let result = tools.player_clubs(Some("alice")).await;
        assert_invariants(&result);
        assert_eq!(result.data, Some(clubs));
        let summary = result.summary.unwrap();
        assert!(summary.contains("Total clubs: 1"));
        assert!(summary.contains("Team USA (joined: "));

        let result = tools.player_daily_games(Some("alice")).await;
        assert_invariants(&result);
        assert_eq!(result.data, Some(games));
        assert!(
            result
                .summary
                .unwrap()
                .contains("alice vs bob (1/86400) - Black to move by No deadline")
        );
    }

    #[tokio::test]
    async fn test_invalid_username_from_client() {
        let mut mock = MockChessApi::new();
        mock.expect_player_stats()
            .returning(|_| Err(ChessApiError::InvalidUsername));

        let result = tools(mock).player_stats(Some("  ")).await;

        assert_invariants(&result);
        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("Invalid username: Username cannot be null or empty")
        );
    }

    #[tokio::test]
    async fn test_blank_and_missing_usernames_fail_without_network() {
        // Nothing listens on the discard port; a request would surface as a
        // transport failure rather than an invalid username.
        let client = ChessClient::new(ChessApiConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            max_retries: 0,
            ..ChessApiConfig::default()
        })
        .unwrap();
        let tools = ChessTools::with_client(client);

        for username in [None, Some(""), Some("   "), Some("\t")] {
            let stats = tools.player_stats(username).await;
            let clubs = tools.player_clubs(username).await;
            let games = tools.player_daily_games(username).await;

            for (success, error) in [
                (stats.success, stats.error),
                (clubs.success, clubs.error),
                (games.success, games.error),
            ] {
                assert!(!success);
                assert!(error.unwrap().contains("Invalid username"));
            }
            assert_eq!(stats.username, username.unwrap_or_default());
        }
    }

    #[tokio::test]
    async fn test_upstream_failures_are_prefixed() {
        let mut mock = MockChessApi::new();
        mock.expect_player_stats().returning(|_| {
            Err(ChessApiError::Upstream {
                username: "hikaru".to_string(),
                resource: Resource::Stats,
                status: 500,
                message: "Internal Server Error".to_string(),
            })
        });
        mock.expect_player_clubs().returning(|_| {
            Err(ChessApiError::Timeout {
                username: "hikaru".to_string(),
                resource: Resource::Clubs,
                timeout: std::time::Duration::from_secs(30),
            })
        });
        mock.expect_player_daily_games().returning(|_| {
            Err(ChessApiError::Deserialization {
                username: "hikaru".to_string(),
                resource: Resource::DailyGames,
                cause: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
            })
        });
        let tools = tools(mock);

        let stats = tools.player_stats(Some("Hikaru")).await;
        assert_invariants(&stats);
        let error = stats.error.unwrap();
        assert!(error.starts_with("Failed to fetch chess statistics: "));
        assert!(error.contains("hikaru"));
        assert!(error.contains("500"));

        let clubs = tools.player_clubs(Some("Hikaru")).await;
        assert_invariants(&clubs);
        assert!(clubs.data.is_none());
        assert!(
            clubs
                .error
                .unwrap()
                .starts_with("Failed to fetch chess clubs: ")
        );

        let games = tools.player_daily_games(Some("Hikaru")).await;
        assert_invariants(&games);
        assert!(
            games
                .error
                .unwrap()
                .starts_with("Failed to fetch chess daily games: ")
        );
    }

    #[test]
    fn test_tool_result_json_round_trip() {
        let success = ToolResult::success("Hikaru", rapid_stats(), "summary\n• line");
        let json = serde_json::to_string(&success).unwrap();
        let parsed: ToolResult<PlayerStats> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, success);

        let failed: ToolResult<PlayerClubs> = ToolResult::failure("x", "Invalid username: nope");
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("data").is_none());
        assert!(value.get("summary").is_none());
        let parsed: ToolResult<PlayerClubs> = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, failed);
    }

    #[test]
    fn test_collection_results_json_round_trip() {
        let clubs = ToolResult::success(
            "alice",
            PlayerClubs {
                clubs: vec![ClubMembership {
                    id: "https://api.chess.com/pub/club/team-usa".to_string(),
                    name: "Team USA".to_string(),
                    joined: 1_500_000_000,
                    last_activity: 1_700_000_000,
                    icon: Some("https://images.chesscomfiles.com/team-usa.png".to_string()),
                    url: Some("https://www.chess.com/club/team-usa".to_string()),
                }],
            },
            "Chess Player Club Memberships Summary for alice:",
        );
        let value = serde_json::to_value(&clubs).unwrap();
        assert_eq!(
            value["data"]["clubs"][0]["@id"],
            "https://api.chess.com/pub/club/team-usa"
        );
        let parsed: ToolResult<PlayerClubs> = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, clubs);

        let games = ToolResult::success(
            "alice",
            PlayerDailyGames {
                games: vec![DailyGame {
                    white: Some("https://api.chess.com/pub/player/alice".to_string()),
                    black: Some("https://api.chess.com/pub/player/bob".to_string()),
                    url: Some("https://www.chess.com/game/daily/123".to_string()),
                    fen: Some("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1".to_string()),
                    pgn: Some("1. e4 *".to_string()),
                    turn: Some("black".to_string()),
                    move_by: 1_700_003_600,
                    last_activity: Some(1_700_000_000),
                    start_time: Some(1_699_990_000),
                    time_control: Some("1/86400".to_string()),
                    time_class: Some("daily".to_string()),
                    rules: Some("chess".to_string()),
                    draw_offer: None,
                    tournament: Some("https://api.chess.com/pub/tournament/daily-1".to_string()),
                    team_match: Some("https://api.chess.com/pub/match/12803".to_string()),
                }],
            },
            "Current Daily Chess Games Summary for alice:",
        );
        let value = serde_json::to_value(&games).unwrap();
        assert_eq!(
            value["data"]["games"][0]["match"],
            "https://api.chess.com/pub/match/12803"
        );
        let parsed: ToolResult<PlayerDailyGames> = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, games);
    }
}
