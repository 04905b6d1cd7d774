//! CLI argument definitions using clap
//!
//! Commands:
//! - registrar init --config <path>
//! - registrar serve --config <path> [--port <port>]
//! - registrar stats --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Registrar - student records over HTTP, stored in JSON files
#[derive(Parser, Debug)]
#[command(name = "registrar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create empty data files
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./registrar.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./registrar.json")]
        config: PathBuf,

        /// Port to listen on, overriding the configured one
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print directory statistics and exit
    Stats {
        /// Path to configuration file
        #[arg(long, default_value = "./registrar.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
