use chess_mcp::{ChessMcpServer, Config, McpTransport, logging};
use clap::Parser;
use miette::Result;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[clap(version, about)]
/// MCP server exposing Chess.com player statistics, clubs and daily games
struct Args {
    /// Configuration file (defaults to chess-mcp.toml in the usual places)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Transport to serve on
    #[arg(short, long)]
    transport: Option<McpTransport>,

    /// Bind host for the HTTP transport
    #[arg(long)]
    host: Option<String>,

    /// Port for the HTTP transport
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let source = match args.config.clone() {
        Some(path) => Some(path),
        None => Config::find_default().await,
    };
    let mut config = match &source {
        Some(path) => Config::load(path).await?,
        None => Config::from_env()?,
    };

    if let Some(transport) = args.transport {
        config.mcp.transport = transport;
    }
    if let Some(host) = args.host {
        config.mcp.host = host;
    }
    if let Some(port) = args.port {
        config.mcp.port = port;
    }
    config.validate()?;

    let _guard = logging::init(&config.logging, args.debug)?;

    match &source {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => info!("No configuration file found, using defaults"),
    }

    info!(
        transport = %config.mcp.transport,
        api_base_url = %config.chess.api_base_url,
        "Starting Chess MCP server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let server = ChessMcpServer::from_config(&config)?;
    server.run(&config).await?;

    Ok(())
}
