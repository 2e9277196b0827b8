//! HTTP handlers for the REST API.
//!
//! Each handler takes one snapshot reference through the query engine and
//! never triggers a refresh.

use axum::{
    extract::{Path, State},
    http::Uri,
    Json,
};

use super::dto::{HealthResponse, LocationsResponse};
use super::error::AppError;
use super::state::AppState;
use crate::query::parse_time_params;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Identification string served at `/`.
pub const SERVICE_NAME: &str = "ScottyLabs Dining API";

// =============================================================================
// Service
// =============================================================================

/// GET /
pub async fn root() -> &'static str {
    SERVICE_NAME
}

/// GET /health
///
/// Readiness: whether a snapshot has been accepted, and how refreshes are going.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.query.store().current_snapshot();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ready: snapshot.is_some(),
        locations: snapshot.as_ref().map_or(0, |s| s.len()),
        snapshot_fetched_at: snapshot.as_ref().map(|s| s.fetch_time()),
        fingerprint: snapshot.as_ref().map(|s| s.fingerprint().to_string()),
        refresh: state.scheduler.status(),
    })
}

/// Fallback for unknown paths.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

// =============================================================================
// Locations
// =============================================================================

/// GET /locations
///
/// Every location in the current snapshot; empty before the first fetch.
pub async fn list_locations(State(state): State<AppState>) -> Json<LocationsResponse> {
    Json(state.query.all().into())
}

/// GET /location/{name}
///
/// Locations whose name contains `name`, ignoring case.
pub async fn locations_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<LocationsResponse> {
    Json(state.query.find_by_name(&name).into())
}

/// GET /locations/time/{day}/{hour}/{min}
///
/// Locations open at the given point of the week.
pub async fn locations_open_at(
    State(state): State<AppState>,
    Path((day, hour, min)): Path<(String, String, String)>,
) -> HandlerResult<LocationsResponse> {
    let locations = match parse_time_params(state.time_params, &day, &hour, &min)? {
        Some(t) => state.query.find_open_at(t),
        None => Vec::new(),
    };
    Ok(Json(locations.into()))
}
