//! Core of a recipe-management application.
//!
//! Recipes are made of ordered steps whose text may embed ingredient tags
//! (`@flour(200,g)`). This crate parses and renders that tag syntax, offers
//! autocomplete over known ingredient names, persists recipes, steps and
//! ingredients in SQLite, and generates illustrative images for ingredients
//! and recipes in the background via the OpenAI images API.
//!
//! The entry point is [`RecipeVault`]:
//!
//! ```no_run
//! use recipe_vault::{RecipeDraft, RecipeVault, VaultConfig};
//!
//! # async fn demo() -> Result<(), recipe_vault::VaultError> {
//! let vault = RecipeVault::open(VaultConfig::load()?).await?;
//! let recipe_id = vault
//!     .save_recipe(&RecipeDraft {
//!         title: "Pancakes".to_string(),
//!         description: None,
//!         steps: vec!["Whisk @flour(200,g) with @milk(300,ml)".to_string()],
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod images;
pub mod jobs;
pub mod model;
pub mod parser;
pub mod suggest;
pub mod units;
pub mod vault;

pub use config::VaultConfig;
pub use display::{format_description, format_step_for_display, title_case};
pub use error::{ValidationErrors, VaultError};
pub use model::{
    Ingredient, Recipe, RecipeDraft, RecipeWithSteps, Step, StepSegment, StepWithIngredients,
};
pub use parser::{extract_ingredient_names, parse_step_text};
pub use suggest::{apply_suggestion, suggest};
pub use units::{canonical_unit, format_ingredient};
pub use vault::RecipeVault;
