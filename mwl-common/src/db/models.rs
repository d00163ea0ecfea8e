//! Row models shared between the database layer and the HTTP API
//!
//! Timestamps named `*_ms` are milliseconds since the Unix epoch; `created_at`
//! and `staged_at` columns hold RFC 3339 strings written at insert time.

use serde::{Deserialize, Serialize};

/// Geographic coordinate pair as sent by clients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Registered user profile, immutable after creation
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub guid: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

/// Staged photo capture awaiting finalization, at most one per user
///
/// stage_guid is regenerated on every stage; finalize deletes conditioned on
/// it to detect a concurrent consume or re-stage.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TempLog {
    pub user_id: String,
    pub stage_guid: String,
    pub photo_ref: String,
    pub author: String,
    pub captured_at_ms: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub staged_at: String,
}

/// Species reference entry from the wildlife library
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesRef {
    pub category: String,
    pub species_id: String,
    pub image_url: String,
    pub common_name: String,
    pub sci_name: String,
}

/// Permanent categorized sighting record produced by finalize
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FinalLog {
    pub guid: String,
    pub user_id: String,
    pub category: String,
    pub species_id: String,
    pub photo_ref: String,
    pub photo_author: String,
    pub captured_at_ms: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: String,
    pub common_name: String,
    pub sci_name: String,
    pub status: String,
    pub created_at: String,
}

/// Free-form field-note sighting record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserLog {
    pub guid: String,
    pub user_id: String,
    pub species_id: String,
    pub species_name: String,
    pub field_notes: String,
    pub photo_ref: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: String,
}

/// Time-bounded public sighting; logically expired once now >= decay_time_ms
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSighting {
    pub guid: String,
    pub user_id: String,
    pub photo_ref: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at_ms: i64,
    pub decay_time_ms: i64,
}

impl TempLog {
    pub fn location(&self) -> Location {
        Location {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}
