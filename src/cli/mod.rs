//! CLI module for registrar
//!
//! Provides command-line interface for:
//! - init: Create empty data files
//! - serve: Run the HTTP server
//! - stats: Print directory aggregates

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve, stats, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;
