//! Active sighting database operations
//!
//! Expiry is a filter predicate at query time, not a background sweep;
//! expired rows remain in storage.

use sqlx::SqlitePool;
use uuid::Uuid;

use mwl_common::db::models::{ActiveSighting, Location};
use mwl_common::time;
use mwl_common::Result;

/// Create an active sighting expiring decay_duration_ms from now
pub async fn create_sighting(
    pool: &SqlitePool,
    user_id: &str,
    photo_ref: &str,
    location: Location,
    decay_duration_ms: i64,
) -> Result<ActiveSighting> {
    let created_at_ms = time::now_ms();
    let sighting = ActiveSighting {
        guid: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        photo_ref: photo_ref.to_string(),
        latitude: location.latitude,
        longitude: location.longitude,
        created_at_ms,
        decay_time_ms: created_at_ms + decay_duration_ms,
    };

    sqlx::query(
        r#"
        INSERT INTO active_sightings
            (guid, user_id, photo_ref, latitude, longitude, created_at_ms, decay_time_ms)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&sighting.guid)
    .bind(&sighting.user_id)
    .bind(&sighting.photo_ref)
    .bind(sighting.latitude)
    .bind(sighting.longitude)
    .bind(sighting.created_at_ms)
    .bind(sighting.decay_time_ms)
    .execute(pool)
    .await?;

    Ok(sighting)
}

/// List sightings whose decay time is strictly after now_ms
///
/// A sighting with decay_time_ms == now_ms is already expired.
pub async fn list_active(pool: &SqlitePool, now_ms: i64) -> Result<Vec<ActiveSighting>> {
    let sightings = sqlx::query_as::<_, ActiveSighting>(
        r#"
        SELECT guid, user_id, photo_ref, latitude, longitude, created_at_ms, decay_time_ms
        FROM active_sightings
        WHERE decay_time_ms > ?
        ORDER BY created_at_ms DESC
        "#,
    )
    .bind(now_ms)
    .fetch_all(pool)
    .await?;

    Ok(sightings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::users;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> (SqlitePool, String) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        mwl_common::db::init::init_schema(&pool).await.unwrap();

        let user_id = users::create_user(&pool, "alice", "alice@example.com")
            .await
            .unwrap();
        (pool, user_id)
    }

    fn test_location() -> Location {
        Location {
            latitude: 43.07,
            longitude: -89.40,
        }
    }

    #[tokio::test]
    async fn test_create_computes_decay_from_duration() {
        let (pool, user_id) = setup_test_db().await;

        let sighting = create_sighting(&pool, &user_id, "p.jpg", test_location(), 3_600_000)
            .await
            .unwrap();

        assert_eq!(
            sighting.decay_time_ms,
            sighting.created_at_ms + 3_600_000
        );
    }

    #[tokio::test]
    async fn test_unexpired_sighting_is_listed() {
        let (pool, user_id) = setup_test_db().await;

        let sighting = create_sighting(&pool, &user_id, "p.jpg", test_location(), 3_600_000)
            .await
            .unwrap();

        let active = list_active(&pool, time::now_ms()).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].guid, sighting.guid);
    }

    #[tokio::test]
    async fn test_decay_boundary_is_exclusive() {
        let (pool, user_id) = setup_test_db().await;

        let sighting = create_sighting(&pool, &user_id, "p.jpg", test_location(), 1_000)
            .await
            .unwrap();

        // At exactly decay_time_ms the sighting is expired
        let at_boundary = list_active(&pool, sighting.decay_time_ms).await.unwrap();
        assert!(at_boundary.is_empty());

        // One millisecond earlier it is still active
        let just_before = list_active(&pool, sighting.decay_time_ms - 1).await.unwrap();
        assert_eq!(just_before.len(), 1);
    }

    #[tokio::test]
    async fn test_expired_sightings_filtered_but_not_deleted() {
        let (pool, user_id) = setup_test_db().await;

        let sighting = create_sighting(&pool, &user_id, "p.jpg", test_location(), 1_000)
            .await
            .unwrap();

        let after_expiry = sighting.decay_time_ms + 1;
        assert!(list_active(&pool, after_expiry).await.unwrap().is_empty());

        // Expiry filters at read time; the row itself stays
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM active_sightings")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_mixed_expiry_listing() {
        let (pool, user_id) = setup_test_db().await;

        let short = create_sighting(&pool, &user_id, "short.jpg", test_location(), 1_000)
            .await
            .unwrap();
        let long = create_sighting(&pool, &user_id, "long.jpg", test_location(), 3_600_000)
            .await
            .unwrap();

        // Query between the two decay times: only the longer one remains
        let active = list_active(&pool, short.decay_time_ms).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].guid, long.guid);
    }
}
