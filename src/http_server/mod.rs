//! # Registrar HTTP Server
//!
//! Axum server exposing the directory and roster over JSON.
//!
//! # Endpoints
//!
//! - `/` - Featured student
//! - `/create_student`, `/get_student/:id`, `/search_students`, `/stats`,
//!   `/update_student/:email`, `/delete_student/:email` - Directory
//! - `/students`, `/students/sort`, `/students/:key` - Roster
//! - `/health` - Health check
//! - `/observability/metrics` - Operation counters

pub mod config;
pub mod directory_routes;
pub mod errors;
pub mod observability_routes;
pub mod roster_routes;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
pub use state::AppState;
