//! Shared handler state

use std::path::Path;
use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path as PathParam, Query};
use axum::Json;
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::registry::{RegistryResult, Roster, StudentDirectory};
use crate::schema::{FeaturedStudent, RosterStudent, Student};
use crate::storage::{JsonFileStore, MemoryStore, RecordStore};

/// State shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub directory: StudentDirectory,
    pub roster: Roster,
    pub metrics: Arc<MetricsRegistry>,
    pub featured: FeaturedStudent,
}

impl AppState {
    /// Build state over the given stores
    pub fn new(
        students: Arc<dyn RecordStore<Student>>,
        roster: Arc<dyn RecordStore<RosterStudent>>,
        featured: FeaturedStudent,
    ) -> Self {
        let metrics = Arc::new(MetricsRegistry::new());
        Self {
            directory: StudentDirectory::new(students, Arc::clone(&metrics)),
            roster: Roster::new(roster, Arc::clone(&metrics)),
            metrics,
            featured,
        }
    }

    /// State backed by JSON data files
    pub fn with_files(students_file: &Path, roster_file: &Path, featured: FeaturedStudent) -> Self {
        Self::new(
            Arc::new(JsonFileStore::<Student>::new(students_file)),
            Arc::new(JsonFileStore::<RosterStudent>::new(roster_file)),
            featured,
        )
    }

    /// State backed by empty in-memory stores
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::<Student>::new()),
            Arc::new(MemoryStore::<RosterStudent>::new()),
            FeaturedStudent::default(),
        )
    }

    /// Run a registry call on the blocking pool.
    ///
    /// Registry operations read and rewrite whole data files with `std::fs`,
    /// so they stay off the async worker threads.
    pub(crate) async fn blocking<T, F>(self: &Arc<Self>, call: F) -> ApiResult<T>
    where
        F: FnOnce(&AppState) -> RegistryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let state = Arc::clone(self);
        let result = tokio::task::spawn_blocking(move || call(&state)).await?;
        Ok(result?)
    }

    /// Unwrap a JSON body, counting unreadable ones as rejected requests
    pub(crate) fn body(
        &self,
        operation: &str,
        body: Result<Json<Value>, JsonRejection>,
    ) -> ApiResult<Value> {
        match body {
            Ok(Json(value)) => Ok(value),
            Err(rejection) => Err(self.reject(operation, "invalid_body", rejection.into())),
        }
    }

    /// Unwrap a query string, counting malformed ones as rejected requests
    pub(crate) fn query<T>(
        &self,
        operation: &str,
        query: Result<Query<T>, QueryRejection>,
    ) -> ApiResult<T> {
        match query {
            Ok(Query(params)) => Ok(params),
            Err(rejection) => Err(self.reject(operation, "invalid_query", rejection.into())),
        }
    }

    /// Unwrap a path parameter, counting undecodable ones as rejected requests
    pub(crate) fn path<T>(
        &self,
        operation: &str,
        path: Result<PathParam<T>, PathRejection>,
    ) -> ApiResult<T> {
        match path {
            Ok(PathParam(value)) => Ok(value),
            Err(rejection) => Err(self.reject(operation, "invalid_path", rejection.into())),
        }
    }

    fn reject(&self, operation: &str, kind: &str, err: ApiError) -> ApiError {
        let message = err.to_string();
        self.metrics.increment_requests_rejected();
        log_event_with_fields(
            Event::RequestRejected,
            &[("operation", operation), ("kind", kind), ("message", message.as_str())],
        );
        err
    }
}
