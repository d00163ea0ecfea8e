//! Species reference library endpoints
//!
//! The log workflow only reads this data. The PUT route is the out-of-band
//! population path for reference imports.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{info, warn};

use mwl_common::db::models::SpeciesRef;

use crate::{db, ApiError, ApiResult, AppState};

/// Request body for PUT /api/species/:category/:species_id
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertSpeciesRequest {
    pub image_url: String,
    pub common_name: String,
    pub sci_name: String,
}

/// GET /api/species/:category/:species_id
pub async fn get_species(
    State(state): State<AppState>,
    Path((category, species_id)): Path<(String, String)>,
) -> ApiResult<Json<SpeciesRef>> {
    let species = db::species::get_species(&state.db, &category, &species_id)
        .await
        .map_err(|e| {
            warn!("Fetching species {}/{} failed: {}", category, species_id, e);
            ApiError::from(e)
        })?
        .ok_or_else(|| ApiError::NotFound(format!("species {}/{}", category, species_id)))?;

    Ok(Json(species))
}

/// PUT /api/species/:category/:species_id
///
/// Creates or replaces one reference entry.
pub async fn upsert_species(
    State(state): State<AppState>,
    Path((category, species_id)): Path<(String, String)>,
    Json(payload): Json<UpsertSpeciesRequest>,
) -> ApiResult<StatusCode> {
    db::species::upsert_species(
        &state.db,
        &category,
        &species_id,
        &payload.image_url,
        &payload.common_name,
        &payload.sci_name,
    )
    .await
    .map_err(|e| {
        warn!("Upserting species {}/{} failed: {}", category, species_id, e);
        ApiError::from(e)
    })?;

    info!("Species reference updated: {}/{}", category, species_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Build species routes
pub fn species_routes() -> Router<AppState> {
    Router::new().route(
        "/api/species/:category/:species_id",
        get(get_species).put(upsert_species),
    )
}
