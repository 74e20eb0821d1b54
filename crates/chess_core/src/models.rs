//! Response models for the Chess.com public API.
//!
//! The upstream API omits whole sections a player has never used (a player
//! who never played bullet has no `chess_bullet` key), so every sub-record is
//! optional and scalar fields fall back to their defaults. Unknown keys are
//! ignored.

use serde::{Deserialize, Serialize};

/// `GET /player/{username}/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chess_daily: Option<GameStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chess960_daily: Option<GameStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chess_rapid: Option<GameStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chess_blitz: Option<GameStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chess_bullet: Option<GameStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tactics: Option<HighLowStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lessons: Option<HighLowStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub puzzle_rush: Option<PuzzleRushStats>,
}

/// Rating history and record for one time control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<Rating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<BestRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<GameRecord>,
}

/// Current rating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rating {
    pub rating: i32,
    /// Epoch seconds
    pub date: i64,
    /// Glicko rating deviation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rd: Option<i32>,
}

/// Best rating ever achieved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BestRating {
    pub rating: i32,
    pub date: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRecord {
    pub win: u32,
    pub loss: u32,
    pub draw: u32,
    /// Average seconds per move, daily games only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_per_move: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_percent: Option<f64>,
}

/// Highest/lowest ratings, used by both tactics and lessons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighLowStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest: Option<RatingPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowest: Option<RatingPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingPoint {
    pub rating: i32,
    pub date: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleRushStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<PuzzleRushBest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleRushBest {
    pub score: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,
}

/// `GET /player/{username}/clubs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerClubs {
    pub clubs: Vec<ClubMembership>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClubMembership {
    /// API URL of the club, used upstream as its identifier
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub joined: i64,
    pub last_activity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// `GET /player/{username}/games`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerDailyGames {
    pub games: Vec<DailyGame>,
}

/// An in-progress daily game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyGame {
    /// Player API URL, e.g. `https://api.chess.com/pub/player/hikaru`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub black: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pgn: Option<String>,
    /// `"white"` or `"black"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn: Option<String>,
    /// Deadline in epoch seconds; 0 means no deadline
    pub move_by: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    /// e.g. `"1/259200"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_control: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draw_offer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament: Option<String>,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub team_match: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stats_with_missing_sections() {
        let json = r#"{
            "chess_rapid": {
                "last": { "rating": 1500, "date": 1700000000, "rd": 45 },
                "best": { "rating": 1620, "date": 1690000000, "game": "https://www.chess.com/game/live/1" },
                "record": { "win": 10, "loss": 5, "draw": 2 }
            },
            "fide": 0,
            "puzzle_rush": { "best": { "total_attempts": 50, "score": 45 } }
        }"#;

        let stats: PlayerStats = serde_json::from_str(json).unwrap();
        let rapid = stats.chess_rapid.as_ref().unwrap();
        assert_eq!(rapid.last.as_ref().unwrap().rating, 1500);
        assert_eq!(rapid.last.as_ref().unwrap().rd, Some(45));
        assert_eq!(rapid.record.as_ref().unwrap().draw, 2);
        assert_eq!(rapid.record.as_ref().unwrap().time_per_move, None);
        assert!(stats.chess_blitz.is_none());
        assert!(stats.tactics.is_none());
        assert_eq!(stats.puzzle_rush.unwrap().best.unwrap().score, 45);
    }

    #[test]
    fn test_empty_objects_deserialize() {
        let stats: PlayerStats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats, PlayerStats::default());

        let clubs: PlayerClubs = serde_json::from_str("{}").unwrap();
        assert!(clubs.clubs.is_empty());

        let games: PlayerDailyGames = serde_json::from_str(r#"{"games": [{}]}"#).unwrap();
        assert_eq!(games.games.len(), 1);
        assert_eq!(games.games[0].move_by, 0);
        assert!(games.games[0].white.is_none());
    }

    #[test]
    fn test_club_and_game_field_names() {
        let clubs: PlayerClubs = serde_json::from_str(
            r#"{"clubs": [{
                "@id": "https://api.chess.com/pub/club/chess-com-developer-community",
                "name": "Chess.com Developer Community",
                "last_activity": 1700000000,
                "icon": "https://images.chesscomfiles.com/icon.png",
                "url": "https://www.chess.com/club/chess-com-developer-community",
                "joined": 1500000000
            }]}"#,
        )
        .unwrap();
        let club = &clubs.clubs[0];
        assert_eq!(
            club.id,
            "https://api.chess.com/pub/club/chess-com-developer-community"
        );
        assert_eq!(club.joined, 1500000000);
        assert_eq!(club.last_activity, 1700000000);

        let games: PlayerDailyGames = serde_json::from_str(
            r#"{"games": [{
                "white": "https://api.chess.com/pub/player/alice",
                "black": "https://api.chess.com/pub/player/bob",
                "turn": "white",
                "move_by": 1700003600,
                "time_control": "1/86400",
                "match": "https://api.chess.com/pub/match/12803"
            }]}"#,
        )
        .unwrap();
        let game = &games.games[0];
        assert_eq!(game.move_by, 1700003600);
        assert_eq!(
            game.team_match.as_deref(),
            Some("https://api.chess.com/pub/match/12803")
        );

        let serialized = serde_json::to_value(game).unwrap();
        assert_eq!(
            serialized["match"],
            "https://api.chess.com/pub/match/12803"
        );
        assert!(serialized.get("fen").is_none());
    }
}
