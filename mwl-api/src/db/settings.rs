//! Settings database operations
//!
//! Get/set accessors for the settings key-value table.

use sqlx::SqlitePool;

use mwl_common::db::init::DEFAULT_ACTIVE_SIGHTING_DECAY_MS;
use mwl_common::{Error, Result};

/// Decay interval applied to active sightings created without an explicit
/// duration
pub async fn get_active_sighting_decay_ms(pool: &SqlitePool) -> Result<i64> {
    get_setting(pool, "active_sighting_decay_ms")
        .await
        .map(|opt| opt.unwrap_or(DEFAULT_ACTIVE_SIGHTING_DECAY_MS))
}

pub async fn set_active_sighting_decay_ms(pool: &SqlitePool, decay_ms: i64) -> Result<()> {
    set_setting(pool, "active_sighting_decay_ms", decay_ms).await
}

/// Generic setting getter (internal)
async fn get_setting<T>(pool: &SqlitePool, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
        .map_err(Error::Database)?;

    match row {
        Some((value,)) => {
            let parsed = value
                .parse::<T>()
                .map_err(|e| Error::Config(format!("Parse setting failed: {}", e)))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

/// Generic setting setter (internal)
async fn set_setting<T>(pool: &SqlitePool, key: &str, value: T) -> Result<()>
where
    T: std::fmt::Display,
{
    sqlx::query(
        "INSERT INTO settings (key, value) VALUES (?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value.to_string())
    .execute(pool)
    .await
    .map_err(Error::Database)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        mwl_common::db::init::init_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_decay_falls_back_to_default_when_unset() {
        let pool = setup_test_db().await;

        let decay = get_active_sighting_decay_ms(&pool).await.unwrap();
        assert_eq!(decay, DEFAULT_ACTIVE_SIGHTING_DECAY_MS);
    }

    #[tokio::test]
    async fn test_set_then_get_decay() {
        let pool = setup_test_db().await;

        set_active_sighting_decay_ms(&pool, 120_000).await.unwrap();

        let decay = get_active_sighting_decay_ms(&pool).await.unwrap();
        assert_eq!(decay, 120_000);
    }

    #[tokio::test]
    async fn test_set_decay_updates_in_place() {
        let pool = setup_test_db().await;

        set_active_sighting_decay_ms(&pool, 1_000).await.unwrap();
        set_active_sighting_decay_ms(&pool, 2_000).await.unwrap();

        let decay = get_active_sighting_decay_ms(&pool).await.unwrap();
        assert_eq!(decay, 2_000);

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM settings WHERE key = 'active_sighting_decay_ms'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_seeded_default_is_readable() {
        let pool = setup_test_db().await;
        mwl_common::db::init::init_default_settings(&pool).await.unwrap();

        let decay = get_active_sighting_decay_ms(&pool).await.unwrap();
        assert_eq!(decay, DEFAULT_ACTIVE_SIGHTING_DECAY_MS);
    }
}
