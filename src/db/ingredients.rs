use sqlx::SqlitePool;

use crate::error::VaultError;
use crate::model::{normalize_name, Ingredient};

pub async fn get(pool: &SqlitePool, ingredient_id: i64) -> Result<Option<Ingredient>, VaultError> {
    let ingredient = sqlx::query_as::<_, Ingredient>(
        "SELECT ingredient_id, name, image_path, last_updated FROM ingredients \
         WHERE ingredient_id = ?",
    )
    .bind(ingredient_id)
    .fetch_optional(pool)
    .await?;
    Ok(ingredient)
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Ingredient>, VaultError> {
    let ingredients = sqlx::query_as::<_, Ingredient>(
        "SELECT ingredient_id, name, image_path, last_updated FROM ingredients ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(ingredients)
}

pub async fn find_by_name(
    pool: &SqlitePool,
    name: &str,
) -> Result<Option<Ingredient>, VaultError> {
    let ingredient = sqlx::query_as::<_, Ingredient>(
        "SELECT ingredient_id, name, image_path, last_updated FROM ingredients WHERE name = ?",
    )
    .bind(normalize_name(name))
    .fetch_optional(pool)
    .await?;
    Ok(ingredient)
}

/// Look up an ingredient by normalized name, creating the row if absent.
///
/// Returns the ingredient and whether it was created by this call. The
/// UNIQUE constraint on `name` makes this safe against concurrent savers:
/// the insert is OR IGNORE, the reread sees whichever row won.
pub async fn find_or_create(
    pool: &SqlitePool,
    name: &str,
) -> Result<(Ingredient, bool), VaultError> {
    let normalized = normalize_name(name);

    if let Some(existing) = find_by_name(pool, &normalized).await? {
        return Ok((existing, false));
    }

    let result = sqlx::query("INSERT OR IGNORE INTO ingredients (name) VALUES (?)")
        .bind(&normalized)
        .execute(pool)
        .await?;
    let created = result.rows_affected() > 0;

    let ingredient = find_by_name(pool, &normalized)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    Ok((ingredient, created))
}

pub async fn delete(pool: &SqlitePool, ingredient_id: i64) -> Result<(), VaultError> {
    sqlx::query("DELETE FROM ingredients WHERE ingredient_id = ?")
        .bind(ingredient_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Record a freshly generated image for an ingredient.
pub async fn update_image_path(
    pool: &SqlitePool,
    ingredient_id: i64,
    image_path: &str,
    timestamp_ms: i64,
) -> Result<(), VaultError> {
    sqlx::query("UPDATE ingredients SET image_path = ?, last_updated = ? WHERE ingredient_id = ?")
        .bind(image_path)
        .bind(timestamp_ms)
        .bind(ingredient_id)
        .execute(pool)
        .await?;
    Ok(())
}
