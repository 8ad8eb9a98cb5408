//! SQLite persistence.
//!
//! The schema is created idempotently on connect. Deleting a recipe cascades
//! to its steps and their cross-references; an ingredient cannot be deleted
//! while any step still references it.

pub mod ingredients;
pub mod recipes;
pub mod steps;

use std::path::Path;

use log::info;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::error::VaultError;

/// Open (creating if needed) the database at `path` and ensure the schema.
pub async fn connect(path: &Path) -> Result<SqlitePool, VaultError> {
    let newly_created = !path.exists();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", path.display());
    } else {
        info!("Opened existing database: {}", path.display());
    }

    // Cross-reference integrity depends on these being enforced
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers while a background job writes
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables if they do not exist. Safe to call repeatedly.
async fn create_schema(pool: &SqlitePool) -> Result<(), VaultError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recipes (
            recipe_id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            image_path TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS steps (
            step_id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL REFERENCES recipes(recipe_id) ON DELETE CASCADE,
            step_number INTEGER NOT NULL,
            description TEXT NOT NULL,
            UNIQUE (recipe_id, step_number)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ingredients (
            ingredient_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            image_path TEXT,
            last_updated INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ingredient_step_refs (
            ingredient_id INTEGER NOT NULL REFERENCES ingredients(ingredient_id) ON DELETE RESTRICT,
            step_id INTEGER NOT NULL REFERENCES steps(step_id) ON DELETE CASCADE,
            PRIMARY KEY (ingredient_id, step_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_ingredient_step_refs_step ON ingredient_step_refs(step_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
