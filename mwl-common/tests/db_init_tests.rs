//! Tests for database initialization
//!
//! Covers automatic database creation, idempotent reopening, and default
//! setting initialization.

use mwl_common::db::init::{init_database, DEFAULT_ACTIVE_SIGHTING_DECAY_MS};

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("mwl.db");

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());

    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("mwl.db");

    let pool1 = init_database(&db_path).await;
    assert!(pool1.is_ok());
    drop(pool1);

    // Opening a second time must succeed and leave the schema intact
    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());
}

#[tokio::test]
async fn test_all_tables_created() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("mwl.db");

    let pool = init_database(&db_path).await.unwrap();

    let tables: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT name
        FROM sqlite_master
        WHERE type = 'table'
          AND name NOT LIKE 'sqlite_%'
        ORDER BY name ASC
        "#,
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    let expected = [
        "active_sightings",
        "final_logs",
        "settings",
        "species",
        "temp_logs",
        "userlogs",
        "users",
    ];

    for name in &expected {
        assert!(
            tables.iter().any(|(t,)| t == name),
            "Missing table: {}",
            name
        );
    }
}

#[tokio::test]
async fn test_default_settings_initialized() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("mwl.db");

    let pool = init_database(&db_path).await.unwrap();

    let decay: Option<String> =
        sqlx::query_scalar("SELECT value FROM settings WHERE key = 'active_sighting_decay_ms'")
            .fetch_optional(&pool)
            .await
            .unwrap();

    assert_eq!(
        decay.as_deref(),
        Some(DEFAULT_ACTIVE_SIGHTING_DECAY_MS.to_string().as_str()),
        "active_sighting_decay_ms has wrong default"
    );
}

#[tokio::test]
async fn test_null_setting_reset_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("mwl.db");

    let pool = init_database(&db_path).await.unwrap();

    sqlx::query("UPDATE settings SET value = NULL WHERE key = 'active_sighting_decay_ms'")
        .execute(&pool)
        .await
        .unwrap();
    drop(pool);

    // Re-initialization resets NULL values to defaults
    let pool = init_database(&db_path).await.unwrap();

    let decay: Option<String> =
        sqlx::query_scalar("SELECT value FROM settings WHERE key = 'active_sighting_decay_ms'")
            .fetch_optional(&pool)
            .await
            .unwrap();

    assert_eq!(decay.as_deref(), Some("3600000"));
}

#[tokio::test]
async fn test_species_table_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("mwl.db");

    let pool = init_database(&db_path).await.unwrap();

    // Reference data is populated out of band, never by initialization
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM species")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(count, 0);
}
