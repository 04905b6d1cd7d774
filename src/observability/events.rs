//! Observable events
//!
//! Every log line names one of these events. Events are explicit and typed.

use std::fmt;

/// Observable events in registrar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// Data files created by `init`
    DataInitialized,
    /// HTTP server binding
    ServerStart,
    /// Server ready for requests
    Serving,
    /// Server failed to start or crashed
    ServerFailed,

    // Directory
    /// Directory student created
    StudentCreated,
    /// Directory student replaced
    StudentUpdated,
    /// Directory student removed
    StudentDeleted,

    // Roster
    /// Roster entry added
    RosterEntryAdded,

    // Failures
    /// Request rejected by validation, uniqueness or lookup
    RequestRejected,
    /// Data file could not be read or written
    StorageFailure,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DataInitialized => "DATA_INITIALIZED",
            Event::ServerStart => "SERVER_START",
            Event::Serving => "REGISTRAR_SERVING",
            Event::ServerFailed => "SERVER_FAILED",

            Event::StudentCreated => "STUDENT_CREATED",
            Event::StudentUpdated => "STUDENT_UPDATED",
            Event::StudentDeleted => "STUDENT_DELETED",

            Event::RosterEntryAdded => "ROSTER_ENTRY_ADDED",

            Event::RequestRejected => "REQUEST_REJECTED",
            Event::StorageFailure => "STORAGE_FAILURE",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::ServerFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
