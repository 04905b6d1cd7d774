//! Student registry operations
//!
//! Two independent collections are served:
//! - the directory (`StudentDirectory`): UUID-keyed students, unique by email
//! - the roster (`Roster`): integer-keyed entries, unique by id and roll number
//!
//! Every operation is one synchronous read-modify-write cycle against its
//! store: load the whole collection, validate, mutate, save the whole
//! collection. Rejections happen before the save, so a failed operation
//! never changes stored data.

mod directory;
mod errors;
mod query;
mod roster;
mod stats;

pub use directory::StudentDirectory;
pub use errors::{RegistryError, RegistryResult};
pub use query::{
    sort_by_cgpa, sort_students, SearchParams, SortDirection, SortKey, SortSpec, StudentQuery,
};
pub use roster::Roster;
pub use stats::{DirectoryStats, NO_STUDENTS_MESSAGE, UNSPECIFIED_DEPARTMENT};

use crate::observability::{log_event_with_fields, Event, MetricsRegistry};

/// Count and log a failed operation, passing the result through
pub(crate) fn observe<T>(
    metrics: &MetricsRegistry,
    operation: &str,
    result: RegistryResult<T>,
) -> RegistryResult<T> {
    if let Err(ref e) = result {
        let message = e.to_string();
        let fields = [("operation", operation), ("kind", e.kind()), ("message", message.as_str())];
        if e.is_client_error() {
            metrics.increment_requests_rejected();
            log_event_with_fields(Event::RequestRejected, &fields);
        } else {
            metrics.increment_storage_failures();
            log_event_with_fields(Event::StorageFailure, &fields);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_counts_rejections() {
        let metrics = MetricsRegistry::new();

        let result: RegistryResult<()> = observe(&metrics, "get", Err(RegistryError::NotFound));
        assert!(result.is_err());
        let result = observe(&metrics, "get", Ok(1));
        assert_eq!(result.unwrap(), 1);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests_rejected, 1);
        assert_eq!(snapshot.storage_failures, 0);
    }

    #[test]
    fn test_observe_counts_storage_failures() {
        let metrics = MetricsRegistry::new();

        let err = crate::storage::StorageError::parse_error("bad");
        let _ = observe::<()>(&metrics, "load", Err(RegistryError::from(err)));

        assert_eq!(metrics.snapshot().storage_failures, 1);
    }
}
