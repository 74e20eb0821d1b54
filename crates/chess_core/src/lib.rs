//! Chess Core - Chess.com player lookups
//!
//! This crate provides:
//! - An HTTP client for the public Chess.com API
//! - Response models for player stats, clubs and daily games
//! - The tool layer that turns lookups into agent-friendly results

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod tools;
pub mod username;

pub use client::{ChessApi, ChessClient, Resource};
pub use config::{ChessApiConfig, ConfigError, ValidationError};
pub use error::{ChessApiError, ChessErrorKind, Result};
pub use tools::{ChessTools, ToolResult};
pub use username::PlayerIdentity;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        ChessApi, ChessApiConfig, ChessApiError, ChessClient, ChessErrorKind, ChessTools,
        PlayerIdentity, ToolResult,
        models::{PlayerClubs, PlayerDailyGames, PlayerStats},
    };
}
