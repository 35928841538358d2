//! CLI module for userdesk
//!
//! Provides command-line interface for:
//! - start: Load configuration and run the HTTP server
//! - routes: Print usage instructions

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{resolve_config, routes, run, run_command, start, write_routes};
pub use errors::{CliError, CliErrorCode, CliResult};
