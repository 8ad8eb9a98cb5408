//! Prompt text for the image-generation service.
//!
//! Both prompts ask for the same vintage-etching look so generated art stays
//! visually consistent across the app.

const STYLE_PREAMBLE: &str = "An image rendered in a vintage etching or engraving style, \
featuring fine cross-hatching and a hand-drawn, textured appearance reminiscent of \
19th-century botanical or scientific illustrations.";

/// Prompt for a single ingredient's illustration. `name` should already be
/// title-cased for display.
pub fn ingredient_prompt(name: &str) -> String {
    format!(
        "{} The image depicts only {}, shown in a single, appropriate form for culinary use. \
         The composition is centered on a plain white background.",
        STYLE_PREAMBLE, name
    )
}

/// Prompt for a finished-dish illustration built from the recipe title and
/// its ingredient roster.
pub fn recipe_prompt(title: &str, ingredient_names: &[String]) -> String {
    format!(
        "{} The image depicts only the final prepared dish: A {} made up of these ingredients: {}. \
         Do not include any individual ingredients, preparation steps, or alternate forms. \
         The dish should be presented in a single, appropriate serving vessel or on a plate, \
         with no additional objects or garnishes. The composition is centered, in FULL color. \
         The background is plain white. The dish's colors should be vibrant.",
        STYLE_PREAMBLE,
        title,
        ingredient_names.join(", ")
    )
}
