use std::path::Path;

use log::{debug, warn};
use sqlx::SqlitePool;

use crate::db;
use crate::display::title_case;
use crate::images::{prompt, storage, ImageGenerator};
use crate::jobs::JobOutcome;

/// One attempt at generating and storing a recipe's finished-dish image.
pub(crate) async fn run(
    pool: &SqlitePool,
    generator: &dyn ImageGenerator,
    image_dir: &Path,
    recipe_id: i64,
) -> JobOutcome {
    debug!("recipe image job started: {}", recipe_id);

    let recipe = match db::recipes::get(pool, recipe_id).await {
        Ok(Some(recipe)) => recipe,
        Ok(None) => {
            warn!("recipe {} not found, abandoning job", recipe_id);
            return JobOutcome::Failure;
        }
        Err(e) => {
            warn!("failed to load recipe {}: {}", recipe_id, e);
            return JobOutcome::Failure;
        }
    };

    let steps = match db::steps::list_with_ingredients(pool, recipe_id).await {
        Ok(steps) => steps,
        Err(e) => {
            warn!("failed to load steps for recipe {}: {}", recipe_id, e);
            return JobOutcome::Failure;
        }
    };
    let ingredient_names: Vec<String> = steps
        .iter()
        .flat_map(|step| step.ingredients.iter())
        .map(|ingredient| title_case(&ingredient.name))
        .collect();

    let prompt = prompt::recipe_prompt(&recipe.title, &ingredient_names);
    let b64 = match generator.generate(&prompt).await {
        Ok(b64) => b64,
        Err(e) => {
            warn!("image generation failed for recipe {}: {}", recipe_id, e);
            return JobOutcome::Retry;
        }
    };

    let dir = image_dir.join("recipe_images");
    let path = match storage::save_base64_image(&dir, &recipe_id.to_string(), &b64).await {
        Ok(path) => path,
        Err(e) => {
            warn!("failed to store image for recipe {}: {}", recipe_id, e);
            return JobOutcome::Failure;
        }
    };
    debug!("image saved to {}", path.display());

    if let Err(e) =
        db::recipes::update_image_path(pool, recipe_id, &path.to_string_lossy()).await
    {
        warn!("failed to record image path for recipe {}: {}", recipe_id, e);
        return JobOutcome::Failure;
    }
    debug!("recipe {} image path recorded", recipe_id);

    JobOutcome::Success
}
