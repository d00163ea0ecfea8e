//! Field-note sighting log endpoints
//!
//! Free-form records a user keeps alongside the finalized log: species,
//! notes, photo, and where it was seen.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use mwl_common::db::models::{Location, UserLog};

use crate::{db, ApiError, ApiResult, AppState};

/// Request body for POST /api/userlogs
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserLogRequest {
    pub user_id: String,
    pub species_id: String,
    pub species_name: String,
    pub field_notes: String,
    pub photo_ref: String,
    pub location: Location,
}

/// Response body for POST /api/userlogs
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserLogResponse {
    pub log_id: String,
}

/// POST /api/userlogs
pub async fn create_userlog(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserLogRequest>,
) -> ApiResult<Json<CreateUserLogResponse>> {
    let log_id = db::userlogs::create_userlog(
        &state.db,
        &payload.user_id,
        &payload.species_id,
        &payload.species_name,
        &payload.field_notes,
        &payload.photo_ref,
        payload.location,
    )
    .await
    .map_err(|e| {
        warn!("Creating userlog for user {} failed: {}", payload.user_id, e);
        ApiError::from(e)
    })?;

    info!("New userlog added with ID: {}", log_id);
    Ok(Json(CreateUserLogResponse { log_id }))
}

/// GET /api/userlogs/:user_id
///
/// All of a user's field-note logs, most recent first.
pub async fn list_userlogs(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<UserLog>>> {
    let logs = db::userlogs::list_userlogs(&state.db, &user_id)
        .await
        .map_err(|e| {
            warn!("Listing userlogs for user {} failed: {}", user_id, e);
            ApiError::from(e)
        })?;

    Ok(Json(logs))
}

/// Build userlog routes
pub fn userlog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/userlogs", post(create_userlog))
        .route("/api/userlogs/:user_id", get(list_userlogs))
}
