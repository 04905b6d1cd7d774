//! CLI command implementations
//!
//! - `init` creates empty data files
//! - `serve` loads configuration and runs the HTTP server until stopped
//! - `stats` prints directory aggregates as one JSON object

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http_server::config::{default_host, default_port};
use crate::http_server::{AppState, HttpServer, HttpServerConfig};
use crate::observability::{log_event_with_fields, Event, Logger, MetricsRegistry, Severity};
use crate::registry::StudentDirectory;
use crate::schema::{FeaturedStudent, RosterStudent, Student};
use crate::storage::{Collection, JsonFileStore, Layout, RecordStore};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory data file (default "students.json")
    #[serde(default = "default_students_file")]
    pub students_file: String,

    /// Roster data file (default "roster.json")
    #[serde(default = "default_roster_file")]
    pub roster_file: String,

    /// Host to bind to (default "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Record served at `/`
    #[serde(default)]
    pub featured_student: FeaturedStudent,

    /// Minimum log severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_students_file() -> String {
    "students.json".to_string()
}
fn default_roster_file() -> String {
    "roster.json".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            students_file: default_students_file(),
            roster_file: default_roster_file(),
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            featured_student: FeaturedStudent::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// A missing file yields the defaults; an unreadable or invalid one is
    /// an error.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            let config = Config::default();
            config.validate()?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.students_file.trim().is_empty() {
            return Err(CliError::config_error("students_file must not be empty"));
        }
        if self.roster_file.trim().is_empty() {
            return Err(CliError::config_error("roster_file must not be empty"));
        }
        if self.students_file == self.roster_file {
            return Err(CliError::config_error(
                "students_file and roster_file must be different files",
            ));
        }
        self.severity()?;

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of trace, info, warn, error, fatal.",
                self.log_level
            ))
        })
    }

    pub fn students_path(&self) -> PathBuf {
        PathBuf::from(&self.students_file)
    }

    pub fn roster_path(&self) -> PathBuf {
        PathBuf::from(&self.roster_file)
    }

    /// HTTP settings, with an optional port override
    pub fn http_config(&self, port: Option<u16>) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: port.unwrap_or(self.port),
            cors_origins: self.cors_origins.clone(),
        }
    }
}

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
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
        Command::Stats { config } => stats(&config),
    }
}

/// Load configuration and apply the log level
fn load_config(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.severity()?);

    let path = config_path.display().to_string();
    log_event_with_fields(Event::ConfigLoaded, &[("path", path.as_str())]);

    Ok(config)
}

/// Create each data file that does not exist yet, holding an empty list
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let students = config.students_path();
    let roster = config.roster_path();

    if students.exists() && roster.exists() {
        return Err(CliError::already_initialized());
    }

    let mut created = Vec::new();
    if !students.exists() {
        JsonFileStore::<Student>::new(&students)
            .save(&Collection::new(Layout::List))
            .map_err(|e| CliError::storage_error(e.to_string()))?;
        created.push(students.display().to_string());
    }
    if !roster.exists() {
        JsonFileStore::<RosterStudent>::new(&roster)
            .save(&Collection::new(Layout::List))
            .map_err(|e| CliError::storage_error(e.to_string()))?;
        created.push(roster.display().to_string());
    }

    let files = created.join(",");
    log_event_with_fields(Event::DataInitialized, &[("files", files.as_str())]);

    write_response(json!({"initialized": true, "created": created}))?;

    Ok(())
}

/// Start the HTTP server over the configured data files
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let config = load_config(config_path)?;

    let state = AppState::with_files(
        &config.students_path(),
        &config.roster_path(),
        config.featured_student.clone(),
    );
    let server = HttpServer::with_state(config.http_config(port), state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server.start().await.map_err(|e| {
            let message = e.to_string();
            log_event_with_fields(Event::ServerFailed, &[("message", message.as_str())]);
            CliError::boot_failed(format!("HTTP server failed: {}", e))
        })
    })?;

    Ok(())
}

/// Print directory aggregates
pub fn stats(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;

    let directory = StudentDirectory::new(
        Arc::new(JsonFileStore::<Student>::new(config.students_path())),
        Arc::new(MetricsRegistry::new()),
    );
    let stats = directory.stats()?;

    write_response(serde_json::to_value(stats)?)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_config(temp_dir: &TempDir) -> PathBuf {
        let config_path = temp_dir.path().join("registrar.json");

        let config = json!({
            "students_file": temp_dir.path().join("students.json").to_string_lossy(),
            "roster_file": temp_dir.path().join("roster.json").to_string_lossy(),
        });

        fs::write(&config_path, config.to_string()).unwrap();
        config_path
    }

    #[test]
    fn test_init_creates_data_files() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);

        init(&config_path).unwrap();

        let students = fs::read_to_string(temp_dir.path().join("students.json")).unwrap();
        let roster = fs::read_to_string(temp_dir.path().join("roster.json")).unwrap();
        assert_eq!(students, "[]");
        assert_eq!(roster, "[]");
    }

    #[test]
    fn test_init_refuses_reinit() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);

        init(&config_path).unwrap();

        let result = init(&config_path);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().code(),
            &CliErrorCode::AlreadyInitialized
        );
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);
        let roster = temp_dir.path().join("roster.json");
        fs::write(&roster, r#"{"1": {"id": 1, "name": "Sara", "age": 20, "roll_number": "R-1"}}"#).unwrap();

        init(&config_path).unwrap();

        assert!(fs::read_to_string(&roster).unwrap().contains("Sara"));
        assert!(temp_dir.path().join("students.json").exists());
    }

    #[test]
    fn test_stats_on_fresh_data() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);

        init(&config_path).unwrap();
        stats(&config_path).unwrap();
    }

    #[test]
    fn test_stats_on_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);
        fs::write(temp_dir.path().join("students.json"), "{not json").unwrap();

        let err = stats(&config_path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::StorageError);
    }

    #[test]
    fn test_config_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("registrar.json");
        fs::write(&config_path, "{}").unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.port, 8000);
        assert_eq!(config.students_file, "students.json");
        assert_eq!(config.featured_student.id, "BSE223046");
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();

        let config = Config::load(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_rejects_shared_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("registrar.json");
        fs::write(
            &config_path,
            json!({"students_file": "data.json", "roster_file": "data.json"}).to_string(),
        )
        .unwrap();

        let err = Config::load(&config_path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_config_rejects_bad_log_level() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("registrar.json");
        fs::write(&config_path, r#"{"log_level": "loud"}"#).unwrap();

        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn test_port_override() {
        let config = Config::default();

        assert_eq!(config.http_config(None).port, 8000);
        assert_eq!(config.http_config(Some(9001)).socket_addr(), "0.0.0.0:9001");
    }
}
