//! Field-note userlog database operations

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use mwl_common::db::models::{Location, UserLog};
use mwl_common::Result;

/// Create a field-note log, returning its new guid
pub async fn create_userlog(
    pool: &SqlitePool,
    user_id: &str,
    species_id: &str,
    species_name: &str,
    field_notes: &str,
    photo_ref: &str,
    location: Location,
) -> Result<String> {
    let guid = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO userlogs
            (guid, user_id, species_id, species_name, field_notes, photo_ref,
             latitude, longitude, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&guid)
    .bind(user_id)
    .bind(species_id)
    .bind(species_name)
    .bind(field_notes)
    .bind(photo_ref)
    .bind(location.latitude)
    .bind(location.longitude)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    Ok(guid)
}

/// List all of a user's field-note logs, most recent first
pub async fn list_userlogs(pool: &SqlitePool, user_id: &str) -> Result<Vec<UserLog>> {
    let logs = sqlx::query_as::<_, UserLog>(
        r#"
        SELECT guid, user_id, species_id, species_name, field_notes, photo_ref,
               latitude, longitude, created_at
        FROM userlogs
        WHERE user_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(logs)
}
