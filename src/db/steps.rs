use sqlx::SqlitePool;

use crate::error::VaultError;
use crate::model::{Ingredient, Step, StepWithIngredients};

pub async fn insert(
    pool: &SqlitePool,
    recipe_id: i64,
    step_number: i64,
    description: &str,
) -> Result<i64, VaultError> {
    let result =
        sqlx::query("INSERT INTO steps (recipe_id, step_number, description) VALUES (?, ?, ?)")
            .bind(recipe_id)
            .bind(step_number)
            .bind(description)
            .execute(pool)
            .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get(pool: &SqlitePool, step_id: i64) -> Result<Option<Step>, VaultError> {
    let step = sqlx::query_as::<_, Step>(
        "SELECT step_id, recipe_id, step_number, description FROM steps WHERE step_id = ?",
    )
    .bind(step_id)
    .fetch_optional(pool)
    .await?;
    Ok(step)
}

pub async fn list_for_recipe(pool: &SqlitePool, recipe_id: i64) -> Result<Vec<Step>, VaultError> {
    let steps = sqlx::query_as::<_, Step>(
        "SELECT step_id, recipe_id, step_number, description FROM steps \
         WHERE recipe_id = ? ORDER BY step_number ASC",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;
    Ok(steps)
}

pub async fn list_with_ingredients(
    pool: &SqlitePool,
    recipe_id: i64,
) -> Result<Vec<StepWithIngredients>, VaultError> {
    let steps = list_for_recipe(pool, recipe_id).await?;
    let mut result = Vec::with_capacity(steps.len());
    for step in steps {
        let ingredients = ingredients_for_step(pool, step.step_id).await?;
        result.push(StepWithIngredients { step, ingredients });
    }
    Ok(result)
}

pub async fn ingredients_for_step(
    pool: &SqlitePool,
    step_id: i64,
) -> Result<Vec<Ingredient>, VaultError> {
    let ingredients = sqlx::query_as::<_, Ingredient>(
        "SELECT i.ingredient_id, i.name, i.image_path, i.last_updated \
         FROM ingredients i \
         JOIN ingredient_step_refs r ON r.ingredient_id = i.ingredient_id \
         WHERE r.step_id = ? ORDER BY i.ingredient_id",
    )
    .bind(step_id)
    .fetch_all(pool)
    .await?;
    Ok(ingredients)
}

/// Record that a step references an ingredient. Inserting the same pair
/// twice is a no-op - the association exists at most once.
pub async fn insert_ingredient_ref(
    pool: &SqlitePool,
    ingredient_id: i64,
    step_id: i64,
) -> Result<(), VaultError> {
    sqlx::query(
        "INSERT OR IGNORE INTO ingredient_step_refs (ingredient_id, step_id) VALUES (?, ?)",
    )
    .bind(ingredient_id)
    .bind(step_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn count_refs(pool: &SqlitePool) -> Result<i64, VaultError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredient_step_refs")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
