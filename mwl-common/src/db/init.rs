//! Database initialization
//!
//! Opens (creating if necessary) the SQLite database and brings the schema
//! up to date. All statements are idempotent, so initialization is safe to
//! run on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::{info, warn};

/// One hour, the original decay interval for active sightings.
pub const DEFAULT_ACTIVE_SIGHTING_DECAY_MS: i64 = 3_600_000;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    init_schema(&pool).await?;
    init_default_settings(&pool).await?;

    Ok(pool)
}

/// Apply connection pragmas and create all tables (idempotent)
///
/// Split out from [`init_database`] so tests can run the full schema against
/// an in-memory pool.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    // WAL allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(pool).await?;

    // Wait rather than fail when another request holds the write lock
    sqlx::query("PRAGMA busy_timeout = 5000").execute(pool).await?;

    create_users_table(pool).await?;
    create_temp_logs_table(pool).await?;
    create_species_table(pool).await?;
    create_final_logs_table(pool).await?;
    create_userlogs_table(pool).await?;
    create_active_sightings_table(pool).await?;
    create_settings_table(pool).await?;

    Ok(())
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the temp_logs table
///
/// One staged photo capture per user, awaiting finalization. The primary key
/// on user_id enforces at-most-one stage; staging again overwrites.
/// stage_guid changes on every stage and is the compare-and-swap token the
/// finalizer deletes against.
async fn create_temp_logs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS temp_logs (
            user_id TEXT PRIMARY KEY REFERENCES users(guid) ON DELETE CASCADE,
            stage_guid TEXT NOT NULL,
            photo_ref TEXT NOT NULL,
            author TEXT NOT NULL,
            captured_at_ms INTEGER NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            staged_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the species reference table
///
/// Read-only lookup data keyed by category then species id, populated out of
/// band. The log workflow never writes it.
async fn create_species_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS species (
            category TEXT NOT NULL,
            species_id TEXT NOT NULL,
            image_url TEXT NOT NULL,
            common_name TEXT NOT NULL,
            sci_name TEXT NOT NULL,
            PRIMARY KEY (category, species_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the final_logs table
///
/// Permanent, categorized sighting records produced by finalize. Append-only.
async fn create_final_logs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS final_logs (
            guid TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(guid) ON DELETE CASCADE,
            category TEXT NOT NULL,
            species_id TEXT NOT NULL,
            photo_ref TEXT NOT NULL,
            photo_author TEXT NOT NULL,
            captured_at_ms INTEGER NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            image_url TEXT NOT NULL,
            common_name TEXT NOT NULL,
            sci_name TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'logged',
            created_at TEXT NOT NULL,
            CHECK (status IN ('logged'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_final_logs_user_category ON final_logs(user_id, category)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_userlogs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS userlogs (
            guid TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(guid) ON DELETE CASCADE,
            species_id TEXT NOT NULL,
            species_name TEXT NOT NULL,
            field_notes TEXT NOT NULL,
            photo_ref TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_userlogs_user ON userlogs(user_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the active_sightings table
///
/// Expiry is query-time filtering on decay_time_ms; expired rows stay in
/// storage.
async fn create_active_sightings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS active_sightings (
            guid TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(guid) ON DELETE CASCADE,
            photo_ref TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            created_at_ms INTEGER NOT NULL,
            decay_time_ms INTEGER NOT NULL,
            CHECK (decay_time_ms >= created_at_ms)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_active_sightings_decay ON active_sightings(decay_time_ms)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the settings table
///
/// Stores application configuration key-value pairs.
pub async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Initialize or update default settings
///
/// Ensures all required settings exist with default values, and resets NULL
/// values back to their defaults.
pub async fn init_default_settings(pool: &SqlitePool) -> Result<()> {
    ensure_setting(
        pool,
        "active_sighting_decay_ms",
        &DEFAULT_ACTIVE_SIGHTING_DECAY_MS.to_string(),
    )
    .await?;

    info!("Default settings initialized");
    Ok(())
}

/// Ensure a setting exists with the specified default value
async fn ensure_setting(pool: &SqlitePool, key: &str, default_value: &str) -> Result<()> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM settings WHERE key = ?)")
        .bind(key)
        .fetch_one(pool)
        .await?;

    if !exists {
        // INSERT OR IGNORE handles concurrent initialization: multiple tasks
        // may pass the exists check simultaneously
        sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(default_value)
            .execute(pool)
            .await?;

        info!("Initialized setting '{}' with default value: {}", key, default_value);
        return Ok(());
    }

    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_one(pool)
        .await?;

    if value.is_none() {
        sqlx::query("UPDATE settings SET value = ? WHERE key = ?")
            .bind(default_value)
            .bind(key)
            .execute(pool)
            .await?;

        warn!("Setting '{}' was NULL, reset to default: {}", key, default_value);
    }

    Ok(())
}
