use std::env;

use recipe_vault::display::format_step_for_display;
use recipe_vault::{RecipeDraft, RecipeVault, VaultConfig};

const USAGE: &str = "usage: recipe-vault <command> [args]

commands:
  list                      list all recipes
  show <recipe-id>          show a recipe with its rendered steps
  add <title> <step>...     save a new recipe
  ingredients               list known ingredients
  regen-ingredient <id>     regenerate an ingredient's image
  regen-recipe <id>         regenerate a recipe's image";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).ok_or(USAGE)?;

    let vault = RecipeVault::open(VaultConfig::load()?).await?;

    match command {
        "list" => {
            for recipe in vault.recipes().await? {
                println!("{}\t{}", recipe.recipe_id, recipe.title);
            }
        }
        "show" => {
            let recipe_id: i64 = args.get(2).ok_or(USAGE)?.parse()?;
            let Some(with_steps) = vault.recipe_with_steps(recipe_id).await? else {
                return Err(format!("no recipe with id {}", recipe_id).into());
            };
            println!("{}", with_steps.recipe.title);
            if let Some(description) = &with_steps.recipe.description {
                println!("{}", description);
            }
            for step in &with_steps.steps {
                println!("{}. {}", step.step_number + 1, format_step_for_display(step));
            }
        }
        "add" => {
            let title = args.get(2).ok_or(USAGE)?.clone();
            let steps: Vec<String> = args[3..].to_vec();
            let draft = RecipeDraft {
                title,
                description: None,
                steps,
            };
            let recipe_id = vault.save_recipe(&draft).await?;
            println!("saved recipe {}", recipe_id);
            // Let triggered image jobs finish before the process exits
            vault.wait_idle().await;
        }
        "ingredients" => {
            for ingredient in vault.ingredients().await? {
                let image = ingredient.image_path.as_deref().unwrap_or("-");
                println!("{}\t{}\t{}", ingredient.ingredient_id, ingredient.name, image);
            }
        }
        "regen-ingredient" => {
            let ingredient_id: i64 = args.get(2).ok_or(USAGE)?.parse()?;
            match vault.regenerate_ingredient_image(ingredient_id) {
                Some(handle) => {
                    let outcome = handle.await?;
                    println!("job finished: {:?}", outcome);
                }
                None => println!("skipped (already running or no API key)"),
            }
        }
        "regen-recipe" => {
            let recipe_id: i64 = args.get(2).ok_or(USAGE)?.parse()?;
            match vault.regenerate_recipe_image(recipe_id) {
                Some(handle) => {
                    let outcome = handle.await?;
                    println!("job finished: {:?}", outcome);
                }
                None => println!("skipped (already running or no API key)"),
            }
        }
        _ => return Err(USAGE.into()),
    }

    Ok(())
}
