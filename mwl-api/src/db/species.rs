//! Species reference library database operations
//!
//! Keyed by category then species id. The log workflow only reads this
//! table; writes happen through the out-of-band reference import path.

use sqlx::SqlitePool;

use mwl_common::db::models::SpeciesRef;
use mwl_common::Result;

/// Fetch one reference entry
pub async fn get_species(
    pool: &SqlitePool,
    category: &str,
    species_id: &str,
) -> Result<Option<SpeciesRef>> {
    let species = sqlx::query_as::<_, SpeciesRef>(
        r#"
        SELECT category, species_id, image_url, common_name, sci_name
        FROM species
        WHERE category = ? AND species_id = ?
        "#,
    )
    .bind(category)
    .bind(species_id)
    .fetch_optional(pool)
    .await?;

    Ok(species)
}

/// Create or replace one reference entry
pub async fn upsert_species(
    pool: &SqlitePool,
    category: &str,
    species_id: &str,
    image_url: &str,
    common_name: &str,
    sci_name: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO species (category, species_id, image_url, common_name, sci_name)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(category, species_id) DO UPDATE SET
            image_url = excluded.image_url,
            common_name = excluded.common_name,
            sci_name = excluded.sci_name
        "#,
    )
    .bind(category)
    .bind(species_id)
    .bind(image_url)
    .bind(common_name)
    .bind(sci_name)
    .execute(pool)
    .await?;

    Ok(())
}
