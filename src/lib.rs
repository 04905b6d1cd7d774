//! registrar - student records over HTTP, stored in JSON files
//!
//! - `storage`: whole-file JSON collections behind the `RecordStore` trait
//! - `schema`: record types and request validation
//! - `registry`: directory and roster operations
//! - `http_server`: axum routes
//! - `observability`: JSON logging and counters
//! - `cli`: init / serve / stats

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod registry;
pub mod schema;
pub mod storage;
