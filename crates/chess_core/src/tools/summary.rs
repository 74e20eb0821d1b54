//! Human-readable summaries of player data.
//!
//! The formatting functions take the time zone explicitly; tool calls use
//! [`chrono::Local`].

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

use crate::models::{GameStats, PlayerClubs, PlayerDailyGames, PlayerStats};

/// Entries listed before the remainder is collapsed into a count line
pub const MAX_LISTED_ENTRIES: usize = 10;

pub const NO_CLUBS_SUMMARY: &str = "This player is not a member of any chess clubs.";
pub const NO_DAILY_GAMES_SUMMARY: &str =
    "This player is not currently playing any daily chess games.";

const BULLET: &str = "• ";

pub fn stats_summary(username: &str, stats: &PlayerStats) -> String {
    let mut lines = vec![format!("Chess Player Statistics Summary for {username}:")];

    let time_controls = [
        ("Rapid", &stats.chess_rapid),
        ("Blitz", &stats.chess_blitz),
        ("Bullet", &stats.chess_bullet),
        ("Daily", &stats.chess_daily),
    ];
    for (label, game_stats) in time_controls {
        if let Some(line) = game_stats.as_ref().and_then(|s| time_control_line(label, s)) {
            lines.push(line);
        }
    }

    if let Some(highest) = stats.tactics.as_ref().and_then(|t| t.highest.as_ref()) {
        lines.push(format!("{BULLET}Tactics: {} (highest)", highest.rating));
    }

    if let Some(best) = stats.puzzle_rush.as_ref().and_then(|p| p.best.as_ref()) {
        lines.push(format!("{BULLET}Puzzle Rush: {} (best score)", best.score));
    }

    lines.join("\n")
}

fn time_control_line(label: &str, stats: &GameStats) -> Option<String> {
    let last = stats.last.as_ref()?;
    let (win, loss, draw) = stats
        .record
        .as_ref()
        .map_or((0, 0, 0), |r| (r.win, r.loss, r.draw));

    Some(format!(
        "{BULLET}{label}: {} (W:{win} L:{loss} D:{draw})",
        last.rating
    ))
}

pub fn clubs_summary<Tz>(username: &str, clubs: &PlayerClubs, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if clubs.clubs.is_empty() {
        return NO_CLUBS_SUMMARY.to_string();
    }

    let mut lines = vec![
        format!("Chess Player Club Memberships Summary for {username}:"),
        format!("{BULLET}Total clubs: {}", clubs.clubs.len()),
    ];

    for club in clubs.clubs.iter().take(MAX_LISTED_ENTRIES) {
        lines.push(format!(
            "{BULLET}{} (joined: {}, last activity: {})",
            club.name,
            format_epoch(club.joined, tz, "%b %Y"),
            format_epoch(club.last_activity, tz, "%b %Y"),
        ));
    }

    if clubs.clubs.len() > MAX_LISTED_ENTRIES {
        lines.push(format!(
            "{BULLET}... and {} more clubs",
            clubs.clubs.len() - MAX_LISTED_ENTRIES
        ));
    }

    lines.join("\n")
}

pub fn daily_games_summary<Tz>(username: &str, games: &PlayerDailyGames, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if games.games.is_empty() {
        return NO_DAILY_GAMES_SUMMARY.to_string();
    }

    let mut lines = vec![
        format!("Current Daily Chess Games Summary for {username}:"),
        format!("{BULLET}Total active games: {}", games.games.len()),
    ];

    for game in games.games.iter().take(MAX_LISTED_ENTRIES) {
        let to_move = if game.turn.as_deref() == Some("white") {
            "White"
        } else {
            "Black"
        };
        let move_by = if game.move_by > 0 {
            format_epoch(game.move_by, tz, "%b %d, %H:%M")
        } else {
            "No deadline".to_string()
        };

        lines.push(format!(
            "{BULLET}{} vs {} ({}) - {to_move} to move by {move_by}",
            handle_from_url(game.white.as_deref()),
            handle_from_url(game.black.as_deref()),
            game.time_control.as_deref().unwrap_or("unknown"),
        ));
    }

    if games.games.len() > MAX_LISTED_ENTRIES {
        lines.push(format!(
            "{BULLET}... and {} more games",
            games.games.len() - MAX_LISTED_ENTRIES
        ));
    }

    lines.join("\n")
}

/// Last non-empty path segment of a player URL, or `"Unknown"`.
pub fn handle_from_url(url: Option<&str>) -> &str {
    url.and_then(|u| u.split('/').rfind(|segment| !segment.is_empty()))
        .unwrap_or("Unknown")
}

fn format_epoch<Tz>(secs: i64, tz: &Tz, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::from_timestamp(secs, 0) {
        Some(utc) => utc.with_timezone(tz).format(pattern).to_string(),
        None => "Unknown".to_string(),
    }
}
