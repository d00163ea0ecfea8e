//! Active sighting endpoints
//!
//! Sightings decay after a configurable interval. Expiry is a query-time
//! filter; expired rows stay in storage.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use mwl_common::db::models::{ActiveSighting, Location};
use mwl_common::time;

use crate::{db, ApiError, ApiResult, AppState};

/// Request body for POST /api/sightings
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSightingRequest {
    pub user_id: String,
    pub photo_ref: String,
    pub location: Location,
    /// Overrides the active_sighting_decay_ms setting when present
    pub decay_duration_ms: Option<i64>,
}

/// Response body for POST /api/sightings
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSightingResponse {
    pub sighting_id: String,
    /// Milliseconds since the Unix epoch at which the sighting expires
    pub decay_time: i64,
}

/// POST /api/sightings
pub async fn create_sighting(
    State(state): State<AppState>,
    Json(payload): Json<CreateSightingRequest>,
) -> ApiResult<Json<CreateSightingResponse>> {
    if payload.photo_ref.trim().is_empty() {
        return Err(ApiError::BadRequest("photoRef cannot be empty".to_string()));
    }

    let decay_duration_ms = match payload.decay_duration_ms {
        Some(ms) if ms <= 0 => {
            return Err(ApiError::BadRequest(
                "decayDurationMs must be positive".to_string(),
            ));
        }
        Some(ms) => ms,
        None => db::settings::get_active_sighting_decay_ms(&state.db)
            .await
            .map_err(ApiError::from)?,
    };

    let sighting = db::sightings::create_sighting(
        &state.db,
        &payload.user_id,
        &payload.photo_ref,
        payload.location,
        decay_duration_ms,
    )
    .await
    .map_err(|e| {
        warn!("Creating sighting for user {} failed: {}", payload.user_id, e);
        ApiError::from(e)
    })?;

    info!("New active sighting added with ID: {}", sighting.guid);
    Ok(Json(CreateSightingResponse {
        sighting_id: sighting.guid,
        decay_time: sighting.decay_time_ms,
    }))
}

/// GET /api/sightings/active
///
/// Sightings whose decay time is still strictly in the future.
pub async fn list_active_sightings(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ActiveSighting>>> {
    let sightings = db::sightings::list_active(&state.db, time::now_ms())
        .await
        .map_err(|e| {
            warn!("Listing active sightings failed: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(sightings))
}

/// Build sighting routes
pub fn sighting_routes() -> Router<AppState> {
    Router::new()
        .route("/api/sightings", post(create_sighting))
        .route("/api/sightings/active", get(list_active_sightings))
}
