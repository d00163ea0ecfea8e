//! User registration and lookup endpoints

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use mwl_common::db::models::User;

use crate::{db, ApiError, ApiResult, AppState};

/// Request body for POST /api/users
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// Response body for POST /api/users
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    pub user_id: String,
}

/// POST /api/users
///
/// Registers a user profile. Profiles are immutable afterwards.
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<Json<CreateUserResponse>> {
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "name and email cannot be empty".to_string(),
        ));
    }

    let user_id = db::users::create_user(&state.db, &payload.name, &payload.email)
        .await
        .map_err(|e| {
            warn!("Creating user failed: {}", e);
            ApiError::from(e)
        })?;

    info!("New user added with ID: {}", user_id);
    Ok(Json(CreateUserResponse { user_id }))
}

/// GET /api/users/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<User>> {
    let user = db::users::get_user(&state.db, &user_id)
        .await
        .map_err(|e| {
            warn!("Fetching user {} failed: {}", user_id, e);
            ApiError::from(e)
        })?
        .ok_or_else(|| ApiError::NotFound(format!("user {}", user_id)))?;

    Ok(Json(user))
}

/// Build user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(create_user))
        .route("/api/users/:user_id", get(get_user))
}
