//! CLI command implementations

use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::http_server::{usage_text, HttpServer, HttpServerConfig};
use crate::observability::init_logging;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Start { config, host, port } => {
            let config = resolve_config(config.as_deref(), host, port)?;
            start(config)
        }
        Command::Routes { port } => routes(port),
    }
}

/// Merge the optional config file with command-line overrides
pub fn resolve_config(
    path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> CliResult<HttpServerConfig> {
    let mut config = match path {
        Some(path) => HttpServerConfig::load(path)?,
        None => HttpServerConfig::default(),
    };

    if let Some(host) = host {
        if host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    Ok(config)
}

/// Start the HTTP server and block until it shuts down
pub fn start(config: HttpServerConfig) -> CliResult<()> {
    init_logging(config.log_format);
    info!(addr = %config.socket_addr(), "starting userdesk");

    let server = HttpServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print usage instructions
pub fn routes(port: u16) -> CliResult<()> {
    let stdout = io::stdout();
    write_routes(port, &mut stdout.lock())
}

/// Write usage instructions to `out`; write failures (e.g. a closed pipe)
/// surface as I/O errors
pub fn write_routes<W: Write>(port: u16, out: &mut W) -> CliResult<()> {
    out.write_all(usage_text(port).as_bytes())?;
    out.flush()?;
    Ok(())
}
