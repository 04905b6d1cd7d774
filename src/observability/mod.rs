//! Observability for registrar
//!
//! - Structured JSON log lines, one per event
//! - Lock-free operation counters
//!
//! Observability is read-only: it never changes the outcome of a request.
//!
//! ```ignore
//! use registrar::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::StudentCreated, &[("email", "ada@example.com")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_students_created();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log an event with fields, at the severity the event implies
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_of(event), event.as_str(), fields);
}

fn severity_of(event: Event) -> Severity {
    if event.is_fatal() {
        return Severity::Fatal;
    }
    match event {
        Event::RequestRejected => Severity::Warn,
        Event::StorageFailure => Severity::Error,
        _ => Severity::Info,
    }
}
