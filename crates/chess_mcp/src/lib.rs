//! Chess MCP - Model Context Protocol server for Chess.com player lookups
//!
//! Exposes the `chess-core` tools over stdio or streamable HTTP.

pub mod config;
pub mod error;
pub mod logging;
pub mod server;

pub use config::{Config, LoggingConfig, McpConfig, McpTransport};
pub use error::{Result, ServerError};
pub use server::{ChessMcpServer, PlayerLookupRequest};
