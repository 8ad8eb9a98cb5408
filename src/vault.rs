//! The vault facade: the single handle an embedding application holds.

use std::sync::Arc;

use log::{debug, info};
use sqlx::SqlitePool;
use tokio::task::JoinHandle;

use crate::config::VaultConfig;
use crate::db;
use crate::error::{ValidationErrors, VaultError};
use crate::images::{ImageGenerator, OpenAiImageClient};
use crate::jobs::{ImageJob, JobOutcome, JobScheduler};
use crate::model::{Ingredient, Recipe, RecipeDraft, RecipeWithSteps, StepWithIngredients};
use crate::parser::extract_ingredient_names;

/// A recipe vault: database plus background image generation.
pub struct RecipeVault {
    pool: SqlitePool,
    scheduler: JobScheduler,
}

impl RecipeVault {
    /// Open the vault described by `config`.
    ///
    /// Without an API key the vault is fully functional except that image
    /// jobs are silently skipped.
    pub async fn open(config: VaultConfig) -> Result<Self, VaultError> {
        let pool = db::connect(&config.database_path).await?;

        let generator: Option<Arc<dyn ImageGenerator>> = match &config.api_key {
            Some(api_key) => Some(Arc::new(OpenAiImageClient::new(
                api_key.clone(),
                &config.image,
            )?)),
            None => {
                info!("no API key configured; image generation disabled");
                None
            }
        };

        let scheduler = JobScheduler::new(
            pool.clone(),
            generator,
            config.image_dir.clone(),
            config.retry.clone(),
        );

        Ok(RecipeVault { pool, scheduler })
    }

    /// The underlying connection pool, for callers that need raw queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Validate and persist a recipe draft, returning the new recipe id.
    ///
    /// On validation failure nothing is persisted. On success every
    /// ingredient tag in the steps is resolved to an ingredient row
    /// (normalized lookup-or-create), each (ingredient, step) pair is
    /// cross-referenced once, and an image job is triggered for every
    /// newly created ingredient.
    pub async fn save_recipe(&self, draft: &RecipeDraft) -> Result<i64, VaultError> {
        let errors = validate_draft(draft);
        if !errors.is_empty() {
            return Err(VaultError::Validation(errors));
        }

        let recipe_id =
            db::recipes::insert(&self.pool, &draft.title, draft.description.as_deref()).await?;

        for (index, description) in draft.steps.iter().enumerate() {
            let step_id =
                db::steps::insert(&self.pool, recipe_id, index as i64, description).await?;

            for name in extract_ingredient_names(description) {
                let (ingredient, created) =
                    db::ingredients::find_or_create(&self.pool, &name).await?;
                if created {
                    debug!(
                        "new ingredient '{}' ({}), triggering image job",
                        ingredient.name, ingredient.ingredient_id
                    );
                    self.scheduler.spawn(ImageJob::Ingredient {
                        ingredient_id: ingredient.ingredient_id,
                    });
                }
                db::steps::insert_ingredient_ref(&self.pool, ingredient.ingredient_id, step_id)
                    .await?;
            }
        }

        info!("saved recipe {} ('{}')", recipe_id, draft.title);
        Ok(recipe_id)
    }

    pub async fn recipes(&self) -> Result<Vec<Recipe>, VaultError> {
        db::recipes::list(&self.pool).await
    }

    pub async fn recipe_with_steps(
        &self,
        recipe_id: i64,
    ) -> Result<Option<RecipeWithSteps>, VaultError> {
        db::recipes::get_with_steps(&self.pool, recipe_id).await
    }

    pub async fn steps_with_ingredients(
        &self,
        recipe_id: i64,
    ) -> Result<Vec<StepWithIngredients>, VaultError> {
        db::steps::list_with_ingredients(&self.pool, recipe_id).await
    }

    pub async fn ingredients(&self) -> Result<Vec<Ingredient>, VaultError> {
        db::ingredients::list(&self.pool).await
    }

    /// Known ingredient names, the corpus the suggestion matcher ranks.
    pub async fn ingredient_names(&self) -> Result<Vec<String>, VaultError> {
        Ok(self
            .ingredients()
            .await?
            .into_iter()
            .map(|ingredient| ingredient.name)
            .collect())
    }

    /// Delete a recipe; its steps and their cross-references go with it.
    pub async fn delete_recipe(&self, recipe_id: i64) -> Result<(), VaultError> {
        db::recipes::delete(&self.pool, recipe_id).await
    }

    /// Delete an ingredient. Fails while any step still references it.
    pub async fn delete_ingredient(&self, ingredient_id: i64) -> Result<(), VaultError> {
        db::ingredients::delete(&self.pool, ingredient_id).await
    }

    /// Trigger regeneration of an ingredient's image.
    ///
    /// `None` means the trigger was dropped: either a job for this
    /// ingredient is already in flight, or no API key is configured.
    pub fn regenerate_ingredient_image(
        &self,
        ingredient_id: i64,
    ) -> Option<JoinHandle<JobOutcome>> {
        self.scheduler.spawn(ImageJob::Ingredient { ingredient_id })
    }

    /// Trigger regeneration of a recipe's finished-dish image.
    pub fn regenerate_recipe_image(&self, recipe_id: i64) -> Option<JoinHandle<JobOutcome>> {
        self.scheduler.spawn(ImageJob::Recipe { recipe_id })
    }

    /// Wait for all in-flight image jobs to finish.
    pub async fn wait_idle(&self) {
        self.scheduler.wait_idle().await;
    }
}

/// Check a draft before anything touches the database.
pub fn validate_draft(draft: &RecipeDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if draft.title.trim().is_empty() {
        errors.title = Some("Title cannot be blank".to_string());
    }

    if draft.steps.is_empty() {
        errors.no_steps = true;
    }

    errors.steps = draft
        .steps
        .iter()
        .map(|step| {
            if step.trim().is_empty() {
                Some("Step cannot be blank".to_string())
            } else {
                None
            }
        })
        .collect();

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, steps: &[&str]) -> RecipeDraft {
        RecipeDraft {
            title: title.to_string(),
            description: None,
            steps: steps.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_draft(&draft("Soup", &["Boil water"])).is_empty());
    }

    #[test]
    fn test_blank_title_rejected() {
        let errors = validate_draft(&draft("   ", &["Boil water"]));
        assert_eq!(errors.title.as_deref(), Some("Title cannot be blank"));
    }

    #[test]
    fn test_empty_step_list_rejected() {
        let errors = validate_draft(&draft("Soup", &[]));
        assert!(errors.no_steps);
    }

    #[test]
    fn test_blank_step_flagged_by_index() {
        let errors = validate_draft(&draft("Soup", &["Boil water", "  ", "Serve"]));
        assert_eq!(errors.steps.len(), 3);
        assert!(errors.steps[0].is_none());
        assert_eq!(errors.steps[1].as_deref(), Some("Step cannot be blank"));
        assert!(errors.steps[2].is_none());
    }
}
