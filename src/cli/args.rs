//! CLI argument definitions using clap
//!
//! Commands:
//! - userdesk start [--config <path>] [--host <host>] [--port <port>]
//! - userdesk routes [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// userdesk - an in-memory user directory behind a JSON REST API
#[derive(Parser, Debug)]
#[command(name = "userdesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Start {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to, overrides the config file
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on, overrides the config file
        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },

    /// Print the endpoint list with example requests
    Routes {
        /// Port used in the example URLs
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
