//! Directory HTTP Routes
//!
//! Endpoints for UUID-keyed students.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use super::errors::ApiResult;
use super::state::AppState;
use crate::registry::{DirectoryStats, SearchParams};
use crate::schema::{FeaturedStudent, Student};

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub heading: String,
    pub student_details: FeaturedStudent,
}

#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub message: String,
    pub student: Student,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ==================
// Directory Routes
// ==================

/// Create directory routes
pub fn directory_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/create_student", post(create_student_handler))
        .route("/get_student/:student_id", get(get_student_handler))
        .route("/search_students", get(search_students_handler))
        .route("/stats", get(stats_handler))
        .route("/update_student/:email", put(update_student_handler))
        .route("/delete_student/:email", delete(delete_student_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn root_handler(State(state): State<Arc<AppState>>) -> Json<RootResponse> {
    Json(RootResponse {
        heading: "Student Information".to_string(),
        student_details: state.featured.clone(),
    })
}

async fn create_student_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<StudentResponse>> {
    let body = state.body("create_student", body)?;
    let student = state.blocking(move |state| state.directory.create(&body)).await?;

    Ok(Json(StudentResponse {
        message: "Student created successfully".to_string(),
        student,
    }))
}

async fn get_student_handler(
    State(state): State<Arc<AppState>>,
    student_id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Student>> {
    let student_id = state.path("get_student", student_id)?;
    let student = state.blocking(move |state| state.directory.get(&student_id)).await?;

    Ok(Json(student))
}

async fn search_students_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Student>>> {
    let params = state.query("search_students", params)?;
    let students = state
        .blocking(move |state| state.directory.search_by_params(&params))
        .await?;

    Ok(Json(students))
}

async fn stats_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<DirectoryStats>> {
    Ok(Json(state.blocking(|state| state.directory.stats()).await?))
}

async fn update_student_handler(
    State(state): State<Arc<AppState>>,
    email: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<StudentResponse>> {
    let email = state.path("update_student", email)?;
    let body = state.body("update_student", body)?;
    let student = state
        .blocking(move |state| state.directory.update(&email, &body))
        .await?;

    Ok(Json(StudentResponse {
        message: "Student updated successfully".to_string(),
        student,
    }))
}

async fn delete_student_handler(
    State(state): State<Arc<AppState>>,
    email: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let email = state.path("delete_student", email)?;
    state.blocking(move |state| state.directory.delete(&email)).await?;

    Ok(Json(MessageResponse {
        message: "Student deleted successfully".to_string(),
    }))
}
