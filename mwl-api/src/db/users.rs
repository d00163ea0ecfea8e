//! User database operations

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use mwl_common::db::models::User;
use mwl_common::Result;

/// Create a user profile, returning its new guid
pub async fn create_user(pool: &SqlitePool, name: &str, email: &str) -> Result<String> {
    let guid = Uuid::new_v4().to_string();

    sqlx::query("INSERT INTO users (guid, name, email, created_at) VALUES (?, ?, ?, ?)")
        .bind(&guid)
        .bind(name)
        .bind(email)
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await?;

    Ok(guid)
}

/// Fetch a user by guid
pub async fn get_user(pool: &SqlitePool, user_id: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT guid, name, email, created_at FROM users WHERE guid = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
