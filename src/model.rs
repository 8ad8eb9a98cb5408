use serde::Serialize;

/// One piece of a parsed step description.
///
/// A step's raw text is a run of literal prose with zero or more embedded
/// `@name(quantity,unit)` ingredient tags; parsing turns it into an ordered
/// sequence of these segments. Segments are transient - they are never
/// persisted, only the raw text is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepSegment {
    /// Literal prose, passed through verbatim when rendering
    Text(String),
    /// An inline ingredient reference
    Ingredient {
        name: String,
        quantity: String,
        unit: String,
    },
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Recipe {
    pub recipe_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Step {
    pub step_id: i64,
    pub recipe_id: i64,
    /// Ordinal position within the recipe, starting at 0
    pub step_number: i64,
    /// Raw instruction text, possibly containing ingredient tags
    pub description: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Ingredient {
    pub ingredient_id: i64,
    /// Stored normalized (trimmed, lowercased); title-cased at display time
    pub name: String,
    pub image_path: Option<String>,
    /// Milliseconds since the epoch of the last image update
    pub last_updated: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeWithSteps {
    pub recipe: Recipe,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepWithIngredients {
    pub step: Step,
    pub ingredients: Vec<Ingredient>,
}

/// Input for saving a new recipe. Step strings are raw descriptions in
/// ordinal order; tags inside them are extracted during save.
#[derive(Debug, Clone, Default)]
pub struct RecipeDraft {
    pub title: String,
    pub description: Option<String>,
    pub steps: Vec<String>,
}

/// Canonical form of an ingredient name as stored and looked up.
///
/// Tag names arrive with whatever case and padding the user typed; every
/// lookup and insert goes through this so a name maps to exactly one row.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Flour "), "flour");
        assert_eq!(normalize_name("OLIVE OIL"), "olive oil");
        assert_eq!(normalize_name("salt"), "salt");
    }
}
