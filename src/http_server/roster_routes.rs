//! Roster HTTP Routes
//!
//! Endpoints for integer-keyed roster entries under `/students`.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::ApiResult;
use super::state::AppState;
use crate::schema::RosterStudent;

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    #[serde(default)]
    pub order: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RosterListResponse {
    pub status: u16,
    pub students: Vec<RosterStudent>,
}

#[derive(Debug, Serialize)]
pub struct RosterEntryResponse {
    pub status: u16,
    pub student: RosterStudent,
}

#[derive(Debug, Serialize)]
pub struct RosterAddedResponse {
    pub message: String,
    pub student: RosterStudent,
}

#[derive(Debug, Serialize)]
pub struct SortedRosterResponse {
    pub status: u16,
    pub sorted_students: Vec<RosterStudent>,
}

// ==================
// Roster Routes
// ==================

/// Create roster routes
pub fn roster_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/students", get(list_handler).post(add_handler))
        .route("/students/", get(list_handler).post(add_handler))
        // Static segment wins over the key capture
        .route("/students/sort", get(sort_handler))
        .route("/students/:key", get(get_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<RosterListResponse>> {
    Ok(Json(RosterListResponse {
        status: 200,
        students: state.blocking(|state| state.roster.list()).await?,
    }))
}

async fn add_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<RosterAddedResponse>> {
    let body = state.body("add_roster_entry", body)?;
    let student = state.blocking(move |state| state.roster.add(&body)).await?;

    Ok(Json(RosterAddedResponse {
        message: "Student added successfully".to_string(),
        student,
    }))
}

async fn sort_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SortQuery>, QueryRejection>,
) -> ApiResult<Json<SortedRosterResponse>> {
    let query = state.query("sort_roster", query)?;
    let sorted_students = state
        .blocking(move |state| state.roster.sorted_by_cgpa(query.order.as_deref()))
        .await?;

    Ok(Json(SortedRosterResponse {
        status: 200,
        sorted_students,
    }))
}

async fn get_handler(
    State(state): State<Arc<AppState>>,
    key: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<RosterEntryResponse>> {
    let key = state.path("get_roster_entry", key)?;

    Ok(Json(RosterEntryResponse {
        status: 200,
        student: state.blocking(move |state| state.roster.get(&key)).await?,
    }))
}
