//! mwl-api library - MadWildlife sighting backend
//!
//! Exposes the application state and router for the binary and for
//! integration tests.

use axum::http::{header::CONTENT_TYPE, Method};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};

pub mod api;
pub mod db;
pub mod error;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
///
/// The pool is handed to every component explicitly; nothing reaches for a
/// process-wide store handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    // Mobile and web clients are served from other origins
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .merge(api::logs::log_routes())
        .merge(api::users::user_routes())
        .merge(api::userlogs::userlog_routes())
        .merge(api::sightings::sighting_routes())
        .merge(api::species::species_routes())
        .merge(api::health::health_routes())
        .layer(cors)
        .with_state(state)
}
