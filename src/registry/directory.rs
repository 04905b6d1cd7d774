//! Directory of students keyed by UUID and unique by email

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use super::errors::{RegistryError, RegistryResult};
use super::observe;
use super::query::{SearchParams, StudentQuery};
use super::stats::DirectoryStats;
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::schema::{parse_student_id, validate_new_student, Student};
use crate::storage::RecordStore;

/// Directory operations over an injected store
#[derive(Debug, Clone)]
pub struct StudentDirectory {
    store: Arc<dyn RecordStore<Student>>,
    metrics: Arc<MetricsRegistry>,
}

impl StudentDirectory {
    pub fn new(store: Arc<dyn RecordStore<Student>>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { store, metrics }
    }

    /// Validates and stores a new student with a fresh id and timestamp.
    ///
    /// # Errors
    ///
    /// - `Validation` if a field violates its constraint
    /// - `Duplicate` if the email is already registered
    pub fn create(&self, body: &Value) -> RegistryResult<Student> {
        observe(&self.metrics, "create_student", self.try_create(body))
    }

    fn try_create(&self, body: &Value) -> RegistryResult<Student> {
        let new_student = validate_new_student(body)?;
        let mut students = self.store.load()?;

        if students.any(|s| s.email == new_student.email) {
            return Err(RegistryError::duplicate_email());
        }

        let student = new_student.into_student(Uuid::new_v4(), Utc::now());
        students.push(student.clone());
        self.store.save(&students)?;

        self.metrics.increment_students_created();
        let id = student.id.to_string();
        log_event_with_fields(
            Event::StudentCreated,
            &[("id", id.as_str()), ("email", student.email.as_str())],
        );
        Ok(student)
    }

    /// Looks a student up by id
    pub fn get(&self, raw_id: &str) -> RegistryResult<Student> {
        observe(&self.metrics, "get_student", self.try_get(raw_id))
    }

    fn try_get(&self, raw_id: &str) -> RegistryResult<Student> {
        let id = parse_student_id(raw_id)?;
        let students = self.store.load()?;
        let student = students
            .find(|s| s.id == id)
            .cloned()
            .ok_or(RegistryError::NotFound)?;
        self.metrics.increment_queries_executed();
        Ok(student)
    }

    /// Filters and sorts the whole directory
    pub fn search(&self, query: &StudentQuery) -> RegistryResult<Vec<Student>> {
        observe(&self.metrics, "search_students", self.try_search(query))
    }

    /// Validates raw query parameters, then searches
    pub fn search_by_params(&self, params: &SearchParams) -> RegistryResult<Vec<Student>> {
        let result = StudentQuery::from_params(params).and_then(|query| self.try_search(&query));
        observe(&self.metrics, "search_students", result)
    }

    fn try_search(&self, query: &StudentQuery) -> RegistryResult<Vec<Student>> {
        let students = self.store.load()?;
        let result = query.apply(students.into_records());
        self.metrics.increment_queries_executed();
        Ok(result)
    }

    /// Aggregates over the whole directory
    pub fn stats(&self) -> RegistryResult<DirectoryStats> {
        observe(&self.metrics, "stats", self.try_stats())
    }

    fn try_stats(&self) -> RegistryResult<DirectoryStats> {
        let students = self.store.load()?;
        let stats = DirectoryStats::compute(students.records());
        self.metrics.increment_queries_executed();
        Ok(stats)
    }

    /// Replaces the client-owned fields of the student registered under `email`.
    ///
    /// # Errors
    ///
    /// - `Validation` if the body is invalid
    /// - `NotFound` if no student has `email`
    /// - `Duplicate` if the new email belongs to another student
    pub fn update(&self, email: &str, body: &Value) -> RegistryResult<Student> {
        observe(&self.metrics, "update_student", self.try_update(email, body))
    }

    fn try_update(&self, email: &str, body: &Value) -> RegistryResult<Student> {
        let replacement = validate_new_student(body)?;
        let mut students = self.store.load()?;

        if !students.any(|s| s.email == email) {
            return Err(RegistryError::NotFound);
        }
        if replacement.email != email && students.any(|s| s.email == replacement.email) {
            return Err(RegistryError::duplicate_email());
        }

        let student = students
            .find_mut(|s| s.email == email)
            .ok_or(RegistryError::NotFound)?;
        replacement.apply_to(student);
        let updated = student.clone();
        self.store.save(&students)?;

        self.metrics.increment_students_updated();
        let id = updated.id.to_string();
        log_event_with_fields(
            Event::StudentUpdated,
            &[("id", id.as_str()), ("email", updated.email.as_str())],
        );
        Ok(updated)
    }

    /// Removes the student registered under `email`
    pub fn delete(&self, email: &str) -> RegistryResult<Student> {
        observe(&self.metrics, "delete_student", self.try_delete(email))
    }

    fn try_delete(&self, email: &str) -> RegistryResult<Student> {
        let mut students = self.store.load()?;
        let removed = students
            .remove_first(|s| s.email == email)
            .ok_or(RegistryError::NotFound)?;
        self.store.save(&students)?;

        self.metrics.increment_students_deleted();
        log_event_with_fields(Event::StudentDeleted, &[("email", email)]);
        Ok(removed)
    }
}
