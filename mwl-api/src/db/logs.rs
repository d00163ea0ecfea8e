//! Sighting log lifecycle database operations
//!
//! A temp log is staged after a photo capture, then finalize joins it against
//! the species reference library and writes the permanent categorized log.
//! Finalize runs as a single transaction: a final log is never written unless
//! a stage and a matching reference entry were both observed, and the stage
//! delete is conditioned on the stage_guid read at the start.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use mwl_common::db::models::{FinalLog, Location, SpeciesRef, TempLog};
use mwl_common::{Error, Result};

/// Stage a photo capture as the user's temp log
///
/// Overwrites any existing stage for the user (last-write-wins, no merge, no
/// history). A fresh stage_guid is assigned on every call.
pub async fn stage_log(
    pool: &SqlitePool,
    user_id: &str,
    photo_ref: &str,
    author: &str,
    captured_at_ms: i64,
    location: Location,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO temp_logs
            (user_id, stage_guid, photo_ref, author, captured_at_ms, latitude, longitude, staged_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(user_id) DO UPDATE SET
            stage_guid = excluded.stage_guid,
            photo_ref = excluded.photo_ref,
            author = excluded.author,
            captured_at_ms = excluded.captured_at_ms,
            latitude = excluded.latitude,
            longitude = excluded.longitude,
            staged_at = excluded.staged_at
        "#,
    )
    .bind(user_id)
    .bind(Uuid::new_v4().to_string())
    .bind(photo_ref)
    .bind(author)
    .bind(captured_at_ms)
    .bind(location.latitude)
    .bind(location.longitude)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch the user's staged temp log, if any
pub async fn get_temp_log(pool: &SqlitePool, user_id: &str) -> Result<Option<TempLog>> {
    let temp = sqlx::query_as::<_, TempLog>(
        r#"
        SELECT user_id, stage_guid, photo_ref, author, captured_at_ms, latitude, longitude, staged_at
        FROM temp_logs
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(temp)
}

/// Finalize the user's staged temp log into a permanent categorized log
///
/// Transaction steps:
/// 1. Read the stage (absent -> MissingStage, no writes)
/// 2. Read the species reference (absent -> UnknownSpecies, no writes)
/// 3. Insert the final log, status "logged"
/// 4. Delete the stage conditioned on its stage_guid; zero rows deleted means
///    a concurrent finalize consumed it or a re-stage replaced it
///    (StageConflict), and the transaction rolls back
pub async fn finalize_log(
    pool: &SqlitePool,
    user_id: &str,
    category: &str,
    species_id: &str,
) -> Result<FinalLog> {
    let mut tx = pool.begin().await?;

    let temp = sqlx::query_as::<_, TempLog>(
        r#"
        SELECT user_id, stage_guid, photo_ref, author, captured_at_ms, latitude, longitude, staged_at
        FROM temp_logs
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| Error::MissingStage {
        user_id: user_id.to_string(),
    })?;

    let species = sqlx::query_as::<_, SpeciesRef>(
        r#"
        SELECT category, species_id, image_url, common_name, sci_name
        FROM species
        WHERE category = ? AND species_id = ?
        "#,
    )
    .bind(category)
    .bind(species_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| Error::UnknownSpecies {
        category: category.to_string(),
        species_id: species_id.to_string(),
    })?;

    // Random suffix keeps repeated sightings of the same species distinct
    let final_log = FinalLog {
        guid: format!("{}_{}", species_id, Uuid::new_v4()),
        user_id: user_id.to_string(),
        category: species.category,
        species_id: species.species_id,
        photo_ref: temp.photo_ref,
        photo_author: temp.author,
        captured_at_ms: temp.captured_at_ms,
        latitude: temp.latitude,
        longitude: temp.longitude,
        image_url: species.image_url,
        common_name: species.common_name,
        sci_name: species.sci_name,
        status: "logged".to_string(),
        created_at: Utc::now().to_rfc3339(),
    };

    sqlx::query(
        r#"
        INSERT INTO final_logs
            (guid, user_id, category, species_id, photo_ref, photo_author,
             captured_at_ms, latitude, longitude, image_url, common_name,
             sci_name, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&final_log.guid)
    .bind(&final_log.user_id)
    .bind(&final_log.category)
    .bind(&final_log.species_id)
    .bind(&final_log.photo_ref)
    .bind(&final_log.photo_author)
    .bind(final_log.captured_at_ms)
    .bind(final_log.latitude)
    .bind(final_log.longitude)
    .bind(&final_log.image_url)
    .bind(&final_log.common_name)
    .bind(&final_log.sci_name)
    .bind(&final_log.status)
    .bind(&final_log.created_at)
    .execute(&mut *tx)
    .await?;

    // Compare-and-swap on the stage: only delete what step 1 read
    let deleted = sqlx::query("DELETE FROM temp_logs WHERE user_id = ? AND stage_guid = ?")
        .bind(user_id)
        .bind(&temp.stage_guid)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if deleted == 0 {
        // Dropping the transaction rolls back the final log insert
        return Err(Error::StageConflict {
            user_id: user_id.to_string(),
        });
    }

    tx.commit().await?;

    info!(
        "Finalized {} log {} for user {}",
        final_log.category, final_log.guid, user_id
    );
    Ok(final_log)
}

/// List a user's finalized logs, optionally restricted to one category
pub async fn list_final_logs(
    pool: &SqlitePool,
    user_id: &str,
    category: Option<&str>,
) -> Result<Vec<FinalLog>> {
    let logs = match category {
        Some(category) => {
            sqlx::query_as::<_, FinalLog>(
                r#"
                SELECT guid, user_id, category, species_id, photo_ref, photo_author,
                       captured_at_ms, latitude, longitude, image_url, common_name,
                       sci_name, status, created_at
                FROM final_logs
                WHERE user_id = ? AND category = ?
                ORDER BY created_at DESC
                "#,
            )
            .bind(user_id)
            .bind(category)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, FinalLog>(
                r#"
                SELECT guid, user_id, category, species_id, photo_ref, photo_author,
                       captured_at_ms, latitude, longitude, image_url, common_name,
                       sci_name, status, created_at
                FROM final_logs
                WHERE user_id = ?
                ORDER BY created_at DESC
                "#,
            )
            .bind(user_id)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(logs)
}
