use std::path::Path;

use chrono::Utc;
use log::{debug, warn};
use sqlx::SqlitePool;

use crate::db;
use crate::display::title_case;
use crate::images::{prompt, storage, ImageGenerator};
use crate::jobs::JobOutcome;

/// One attempt at generating and storing an ingredient's image.
pub(crate) async fn run(
    pool: &SqlitePool,
    generator: &dyn ImageGenerator,
    image_dir: &Path,
    ingredient_id: i64,
) -> JobOutcome {
    debug!("ingredient image job started: {}", ingredient_id);

    let ingredient = match db::ingredients::get(pool, ingredient_id).await {
        Ok(Some(ingredient)) => ingredient,
        Ok(None) => {
            warn!("ingredient {} not found, abandoning job", ingredient_id);
            return JobOutcome::Failure;
        }
        Err(e) => {
            warn!("failed to load ingredient {}: {}", ingredient_id, e);
            return JobOutcome::Failure;
        }
    };
    if ingredient.name.trim().is_empty() {
        warn!("ingredient {} has a blank name, abandoning job", ingredient_id);
        return JobOutcome::Failure;
    }

    let prompt = prompt::ingredient_prompt(&title_case(&ingredient.name));
    let b64 = match generator.generate(&prompt).await {
        Ok(b64) => b64,
        Err(e) => {
            warn!(
                "image generation failed for ingredient {}: {}",
                ingredient_id, e
            );
            return JobOutcome::Retry;
        }
    };

    let dir = image_dir.join("ingredient_images");
    let path = match storage::save_base64_image(&dir, &ingredient_id.to_string(), &b64).await {
        Ok(path) => path,
        Err(e) => {
            warn!("failed to store image for ingredient {}: {}", ingredient_id, e);
            return JobOutcome::Failure;
        }
    };
    debug!("image saved to {}", path.display());

    let timestamp = Utc::now().timestamp_millis();
    if let Err(e) = db::ingredients::update_image_path(
        pool,
        ingredient_id,
        &path.to_string_lossy(),
        timestamp,
    )
    .await
    {
        warn!(
            "failed to record image path for ingredient {}: {}",
            ingredient_id, e
        );
        return JobOutcome::Failure;
    }
    debug!("ingredient {} image path recorded", ingredient_id);

    JobOutcome::Success
}
