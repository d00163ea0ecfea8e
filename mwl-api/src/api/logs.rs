//! Sighting log lifecycle endpoints
//!
//! Two-step workflow: the camera posts a temp log after a photo capture,
//! then the field guide finalizes it against the species library.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::warn;

use mwl_common::db::models::{FinalLog, Location};

use crate::{db, ApiError, ApiResult, AppState};

/// Request body for POST /api/logs/temp
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TempLogRequest {
    pub user_id: String,
    pub photo_ref: String,
    pub author: String,
    /// Capture time, milliseconds since the Unix epoch
    pub timestamp: i64,
    pub location: Location,
}

/// Request body for POST /api/logs/finalize
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeLogRequest {
    pub user_id: String,
    pub category: String,
    pub species_id: String,
}

/// Query parameters for GET /api/logs/:user_id
#[derive(Debug, Deserialize)]
pub struct FinalLogQuery {
    pub category: Option<String>,
}

/// POST /api/logs/temp
///
/// Stages a photo capture as the user's temp log. A second stage before
/// finalize overwrites the first (last-write-wins, no queuing).
pub async fn stage_temp_log(
    State(state): State<AppState>,
    Json(payload): Json<TempLogRequest>,
) -> ApiResult<StatusCode> {
    if payload.photo_ref.trim().is_empty() {
        return Err(ApiError::BadRequest("photoRef cannot be empty".to_string()));
    }

    db::logs::stage_log(
        &state.db,
        &payload.user_id,
        &payload.photo_ref,
        &payload.author,
        payload.timestamp,
        payload.location,
    )
    .await
    .map_err(|e| {
        warn!("Staging temp log for user {} failed: {}", payload.user_id, e);
        ApiError::from(e)
    })?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/logs/finalize
///
/// Converts the user's staged temp log into a permanent categorized log.
/// 409 when no stage exists or a concurrent finalize won the race; 404 when
/// the category/species pair is not in the reference library.
pub async fn finalize_log(
    State(state): State<AppState>,
    Json(payload): Json<FinalizeLogRequest>,
) -> ApiResult<StatusCode> {
    db::logs::finalize_log(
        &state.db,
        &payload.user_id,
        &payload.category,
        &payload.species_id,
    )
    .await
    .map_err(|e| {
        warn!("Finalize for user {} failed: {}", payload.user_id, e);
        ApiError::from(e)
    })?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/logs/:user_id?category=
///
/// Lists a user's finalized logs, optionally restricted to one category.
pub async fn list_final_logs(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<FinalLogQuery>,
) -> ApiResult<Json<Vec<FinalLog>>> {
    let logs = db::logs::list_final_logs(&state.db, &user_id, query.category.as_deref())
        .await
        .map_err(|e| {
            warn!("Listing final logs for user {} failed: {}", user_id, e);
            ApiError::from(e)
        })?;

    Ok(Json(logs))
}

/// Build log lifecycle routes
pub fn log_routes() -> Router<AppState> {
    Router::new()
        .route("/api/logs/temp", post(stage_temp_log))
        .route("/api/logs/finalize", post(finalize_log))
        .route("/api/logs/:user_id", get(list_final_logs))
}
