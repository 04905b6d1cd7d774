//! Operation counters
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics registry containing all operational counters
///
/// Counters use `Relaxed` ordering; they are reported, never synchronised on.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Directory students created
    students_created: AtomicU64,
    /// Directory students updated
    students_updated: AtomicU64,
    /// Directory students deleted
    students_deleted: AtomicU64,
    /// Roster entries added
    roster_added: AtomicU64,
    /// Successful read operations (get, search, stats, list, sort)
    queries_executed: AtomicU64,
    /// Requests rejected with a client error
    requests_rejected: AtomicU64,
    /// Data file read/write failures
    storage_failures: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    // Write metrics

    pub fn increment_students_created(&self) {
        self.students_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_students_updated(&self) {
        self.students_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_students_deleted(&self) {
        self.students_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_roster_added(&self) {
        self.roster_added.fetch_add(1, Ordering::Relaxed);
    }

    // Read metrics

    /// Increment queries executed
    pub fn increment_queries_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    // Failure metrics

    /// Increment requests rejected
    pub fn increment_requests_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment storage failures
    pub fn increment_storage_failures(&self) {
        self.storage_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current snapshot of all metrics as JSON
    pub fn to_json(&self) -> String {
        let s = self.snapshot();
        format!(
            r#"{{"students_created":{},"students_updated":{},"students_deleted":{},"roster_added":{},"queries_executed":{},"requests_rejected":{},"storage_failures":{}}}"#,
            s.students_created,
            s.students_updated,
            s.students_deleted,
            s.roster_added,
            s.queries_executed,
            s.requests_rejected,
            s.storage_failures,
        )
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            students_created: self.students_created.load(Ordering::Relaxed),
            students_updated: self.students_updated.load(Ordering::Relaxed),
            students_deleted: self.students_deleted.load(Ordering::Relaxed),
            roster_added: self.roster_added.load(Ordering::Relaxed),
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            storage_failures: self.storage_failures.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub students_created: u64,
    pub students_updated: u64,
    pub students_deleted: u64,
    pub roster_added: u64,
    pub queries_executed: u64,
    pub requests_rejected: u64,
    pub storage_failures: u64,
}
