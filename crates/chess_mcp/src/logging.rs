use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::LoggingConfig,
    error::{Result, ServerError},
};

const DEBUG_DIRECTIVES: &str = "chess_core=debug,chess_mcp=debug,rmcp=info,info";

/// Install the global subscriber.
///
/// Console output always goes to stderr: on the stdio transport stdout
/// carries protocol frames. The returned guard flushes the file writer and
/// must be held until shutdown.
pub fn init(config: &LoggingConfig, debug: bool) -> Result<Option<WorkerGuard>> {
    let filter = filter(config, debug);

    let (file_layer, guard) = match &config.file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path
                .file_name()
                .map(|name| name.to_os_string())
                .unwrap_or_else(|| "chess-mcp.log".into());

            std::fs::create_dir_all(directory).map_err(|e| ServerError::LoggingInitFailed {
                cause: Box::new(e),
            })?;

            let appender = tracing_appender::rolling::daily(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_line_number(true)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .with(file_layer)
        .try_init()
        .map_err(|e| ServerError::LoggingInitFailed { cause: Box::new(e) })?;

    Ok(guard)
}

fn filter(config: &LoggingConfig, debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new(DEBUG_DIRECTIVES)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
    }
}
