use sqlx::SqlitePool;

use crate::error::VaultError;
use crate::model::{Recipe, RecipeWithSteps};

pub async fn insert(
    pool: &SqlitePool,
    title: &str,
    description: Option<&str>,
) -> Result<i64, VaultError> {
    let result = sqlx::query("INSERT INTO recipes (title, description) VALUES (?, ?)")
        .bind(title)
        .bind(description)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Recipe>, VaultError> {
    let recipes = sqlx::query_as::<_, Recipe>(
        "SELECT recipe_id, title, description, image_path FROM recipes ORDER BY recipe_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(recipes)
}

pub async fn get(pool: &SqlitePool, recipe_id: i64) -> Result<Option<Recipe>, VaultError> {
    let recipe = sqlx::query_as::<_, Recipe>(
        "SELECT recipe_id, title, description, image_path FROM recipes WHERE recipe_id = ?",
    )
    .bind(recipe_id)
    .fetch_optional(pool)
    .await?;
    Ok(recipe)
}

pub async fn get_with_steps(
    pool: &SqlitePool,
    recipe_id: i64,
) -> Result<Option<RecipeWithSteps>, VaultError> {
    let Some(recipe) = get(pool, recipe_id).await? else {
        return Ok(None);
    };
    let steps = super::steps::list_for_recipe(pool, recipe_id).await?;
    Ok(Some(RecipeWithSteps { recipe, steps }))
}

pub async fn delete(pool: &SqlitePool, recipe_id: i64) -> Result<(), VaultError> {
    sqlx::query("DELETE FROM recipes WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_image_path(
    pool: &SqlitePool,
    recipe_id: i64,
    image_path: &str,
) -> Result<(), VaultError> {
    sqlx::query("UPDATE recipes SET image_path = ? WHERE recipe_id = ?")
        .bind(image_path)
        .bind(recipe_id)
        .execute(pool)
        .await?;
    Ok(())
}
