//! Rendering stored steps back into human-readable text.

use crate::model::{Step, StepSegment};
use crate::parser::parse_step_text;
use crate::units::format_ingredient;

/// Title-case a name for display: underscores become spaces, every word
/// starts uppercase, the rest is lowered.
pub fn title_case(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    if s.contains('_') {
        return title_case(&s.replace('_', " "));
    }
    s.to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a stored step for display.
///
/// Parses the raw description and concatenates each segment's rendering:
/// literal text verbatim, ingredient references through the unit formatter
/// with a title-cased name. Total and deterministic - a description with no
/// tags comes back unchanged.
pub fn format_step_for_display(step: &Step) -> String {
    format_description(&step.description)
}

/// Same as [`format_step_for_display`], for a raw description string.
pub fn format_description(description: &str) -> String {
    parse_step_text(description)
        .into_iter()
        .map(|segment| match segment {
            StepSegment::Text(text) => text,
            StepSegment::Ingredient {
                name,
                quantity,
                unit,
            } => format_ingredient(&title_case(&name), &quantity, &unit),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("flour"), "Flour");
        assert_eq!(title_case("OLIVE OIL"), "Olive Oil");
        assert_eq!(title_case("self_raising_flour"), "Self Raising Flour");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_plain_description_round_trips() {
        let description = "Knead for ten minutes, then rest.";
        assert_eq!(format_description(description), description);
    }

    #[test]
    fn test_tags_render_through_formatter() {
        assert_eq!(
            format_description("Add @flour(200,g) and mix"),
            "Add Flour (200g) and mix"
        );
        assert_eq!(
            format_description("Stir in @sugar(3,cup) slowly"),
            "Stir in Sugar (3 cups) slowly"
        );
    }

    #[test]
    fn test_bare_tag_renders_bare_name() {
        assert_eq!(format_description("Season with @salt(,)"), "Season with Salt");
    }

    #[test]
    fn test_malformed_tag_stays_literal() {
        assert_eq!(format_description("Add @flour(200,g"), "Add @flour(200,g");
    }
}
