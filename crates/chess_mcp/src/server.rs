use chess_core::{ChessApi, ChessClient, ChessTools, ToolResult};
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    config::{Config, McpTransport},
    error::{self, ServerError},
};

const INSTRUCTIONS: &str = "Chess.com player lookups. Each tool takes a Chess.com username and \
returns JSON with `success`, `error`, `data` and a human-readable `summary`.";

/// Arguments shared by every player lookup tool
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
pub struct PlayerLookupRequest {
    /// Chess.com username, case-insensitive
    #[serde(default)]
    pub username: Option<String>,
}

/// MCP server exposing the Chess.com lookups as tools
#[derive(Clone)]
pub struct ChessMcpServer {
    tools: ChessTools,
    tool_router: ToolRouter<Self>,
}

impl ChessMcpServer {
    pub fn new(api: Arc<dyn ChessApi>) -> Self {
        let tool_router = Self::tool_router();
        info!(
            "Tool router initialized with {} tools",
            tool_router.list_all().len()
        );

        Self {
            tools: ChessTools::new(api),
            tool_router,
        }
    }

    pub fn from_config(config: &Config) -> error::Result<Self> {
        let client = ChessClient::new(config.chess.clone())?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Serve on the configured transport until the client disconnects or
    /// the process is interrupted.
    pub async fn run(self, config: &Config) -> error::Result<()> {
        match config.mcp.transport {
            McpTransport::Stdio => self.run_stdio().await,
            McpTransport::Http => self.run_http(&config.mcp.host, config.mcp.port).await,
        }
    }

    /// Run the MCP server on stdio transport
    pub async fn run_stdio(self) -> error::Result<()> {
        info!("Starting MCP server on stdio transport");

        let server = self
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| ServerError::TransportInitFailed {
                transport: McpTransport::Stdio.to_string(),
                cause: Box::new(e),
            })?;

        let quit_reason = server
            .waiting()
            .await
            .map_err(|e| ServerError::ServeFailed {
                transport: McpTransport::Stdio.to_string(),
                cause: Box::new(e),
            })?;

        info!("Server stopped: {:?}", quit_reason);
        Ok(())
    }

    /// Run the MCP server on streamable HTTP transport under `/mcp`
    pub async fn run_http(self, host: &str, port: u16) -> error::Result<()> {
        use rmcp::transport::streamable_http_server::{
            StreamableHttpService, session::local::LocalSessionManager,
        };
        use tokio::net::TcpListener;

        let address = format!("{host}:{port}");
        info!("Starting MCP server on HTTP transport at {}", address);

        let service = StreamableHttpService::new(
            move || {
                debug!("Creating new MCP handler instance");
                Ok(self.clone())
            },
            LocalSessionManager::default().into(),
            Default::default(),
        );
        let router = axum::Router::new().nest_service("/mcp", service);

        let listener =
            TcpListener::bind(&address)
                .await
                .map_err(|e| ServerError::ServerBindFailed {
                    address: address.clone(),
                    cause: e,
                })?;

        info!("MCP HTTP server listening on http://{}/mcp", address);

        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Received interrupt, shutting down");
                }
            })
            .await
            .map_err(|e| ServerError::ServeFailed {
                transport: McpTransport::Http.to_string(),
                cause: Box::new(e),
            })
    }
}

/// Chess failures are reported inside the payload, never as protocol errors.
fn json_content<T: Serialize>(
    result: &ToolResult<T>,
) -> std::result::Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::json(result)?]))
}

#[tool_router]
impl ChessMcpServer {
    #[tool(
        description = "Gets comprehensive chess statistics for a player from Chess.com including ratings, records, and performance metrics across different time controls"
    )]
    async fn get_chess_player_stats(
        &self,
        Parameters(request): Parameters<PlayerLookupRequest>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let result = self.tools.player_stats(request.username.as_deref()).await;
        json_content(&result)
    }

    #[tool(
        description = "Gets the list of chess clubs that a player is a member of from Chess.com, including club names, join dates, and activity information"
    )]
    async fn get_chess_player_clubs(
        &self,
        Parameters(request): Parameters<PlayerLookupRequest>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let result = self.tools.player_clubs(request.username.as_deref()).await;
        json_content(&result)
    }

    #[tool(
        description = "Gets the current daily chess games that a player is actively playing on Chess.com, including game positions, time controls, and opponent information"
    )]
    async fn get_chess_player_daily_games(
        &self,
        Parameters(request): Parameters<PlayerLookupRequest>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let result = self
            .tools
            .player_daily_games(request.username.as_deref())
            .await;
        json_content(&result)
    }
}

#[tool_handler]
impl ServerHandler for ChessMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "chess-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
