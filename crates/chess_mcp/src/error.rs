use chess_core::{ChessApiError, ConfigError};
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ServerError {
    #[error("Failed to read configuration file {}", path.display())]
    #[diagnostic(code(chess_mcp::config::read_failed))]
    ConfigReadFailed {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("Failed to parse configuration file {}", path.display())]
    #[diagnostic(
        code(chess_mcp::config::parse_failed),
        help("Check the TOML syntax and the [chess], [mcp] and [logging] tables")
    )]
    ConfigParseFailed {
        path: PathBuf,
        #[source]
        cause: toml::de::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ChessClient(#[from] ChessApiError),

    #[error("Failed to initialize logging")]
    #[diagnostic(code(chess_mcp::logging_init_failed))]
    LoggingInitFailed {
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Server bind failed")]
    #[diagnostic(
        code(chess_mcp::server_bind_failed),
        help("Failed to bind MCP server to {address}. Is the port already in use?")
    )]
    ServerBindFailed {
        address: String,
        #[source]
        cause: std::io::Error,
    },

    #[error("Transport initialization failed")]
    #[diagnostic(
        code(chess_mcp::transport_init_failed),
        help("Failed to initialize {transport} transport")
    )]
    TransportInitFailed {
        transport: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("MCP server on {transport} transport stopped with an error")]
    #[diagnostic(code(chess_mcp::serve_failed))]
    ServeFailed {
        transport: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, ServerError>;
