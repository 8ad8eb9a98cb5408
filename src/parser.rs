//! Scanner for the inline ingredient-tag syntax.
//!
//! A tag looks like `@name(quantity,unit)`: `@`, then a name running up to
//! the opening parenthesis, then a comma-separated parameter list closed by
//! `)`. Either parameter may be empty. Anything that does not complete into
//! that shape stays literal text - parsing never fails.

use std::collections::HashSet;

use crate::model::{normalize_name, StepSegment};

/// Parse a raw step description into its ordered segments.
///
/// Malformed constructs degrade to literal text:
/// - an unterminated tag (no `(` or no `)` before end of input) turns the
///   whole remainder, `@` included, into text;
/// - a blank-named tag (`@(...)`) is kept verbatim as text and scanning
///   resumes after its `)`, so later well-formed tags are still recognized.
///
/// Concatenating the rendered segments in order reproduces a formatted
/// version of the input.
pub fn parse_step_text(input: &str) -> Vec<StepSegment> {
    let mut segments = Vec::new();
    let mut text = String::new();
    // Byte offset of the first not-yet-consumed character; always lands on a
    // char boundary because we only advance past ASCII delimiters.
    let mut pos = 0;

    while pos < input.len() {
        let Some(at) = input[pos..].find('@') else {
            break;
        };
        let at = pos + at;
        let name_start = at + 1;

        // Name runs to the next '('; without one the tag never completes.
        let Some(open) = input[name_start..].find('(') else {
            text.push_str(&input[pos..]);
            pos = input.len();
            break;
        };
        let name = &input[name_start..name_start + open];

        let params_start = name_start + open + 1;
        let Some(close) = input[params_start..].find(')') else {
            text.push_str(&input[pos..]);
            pos = input.len();
            break;
        };
        let params_end = params_start + close;
        let after_tag = params_end + 1;

        if name.trim().is_empty() {
            // Blank name: the tag itself stays literal, the scan continues.
            text.push_str(&input[pos..after_tag]);
            pos = after_tag;
            continue;
        }

        let mut params = input[params_start..params_end].split(',');
        let quantity = params.next().unwrap_or("").trim().to_string();
        let unit = params.next().unwrap_or("").trim().to_string();

        text.push_str(&input[pos..at]);
        if !text.is_empty() {
            segments.push(StepSegment::Text(std::mem::take(&mut text)));
        }
        segments.push(StepSegment::Ingredient {
            name: name.to_string(),
            quantity,
            unit,
        });
        pos = after_tag;
    }

    text.push_str(&input[pos..]);
    if !text.is_empty() {
        segments.push(StepSegment::Text(text));
    }

    segments
}

/// Distinct normalized ingredient names referenced by a step description, in
/// first-appearance order. This is the on-save extraction path, so it sees
/// exactly the tags the parser sees.
pub fn extract_ingredient_names(input: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for segment in parse_step_text(input) {
        if let StepSegment::Ingredient { name, .. } = segment {
            let normalized = normalize_name(&name);
            if seen.insert(normalized.clone()) {
                names.push(normalized);
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> StepSegment {
        StepSegment::Text(s.to_string())
    }

    fn ingredient(name: &str, quantity: &str, unit: &str) -> StepSegment {
        StepSegment::Ingredient {
            name: name.to_string(),
            quantity: quantity.to_string(),
            unit: unit.to_string(),
        }
    }

    #[test]
    fn test_plain_text_is_one_segment() {
        assert_eq!(
            parse_step_text("Mix everything together"),
            vec![text("Mix everything together")]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_step_text("").is_empty());
    }

    #[test]
    fn test_tag_between_text() {
        assert_eq!(
            parse_step_text("Add @flour(200,g) and mix"),
            vec![
                text("Add "),
                ingredient("flour", "200", "g"),
                text(" and mix"),
            ]
        );
    }

    #[test]
    fn test_tag_at_start_and_end() {
        assert_eq!(
            parse_step_text("@flour(200,g)"),
            vec![ingredient("flour", "200", "g")]
        );
        assert_eq!(
            parse_step_text("Finish with @parsley(,)"),
            vec![text("Finish with "), ingredient("parsley", "", "")]
        );
    }

    #[test]
    fn test_params_are_trimmed() {
        assert_eq!(
            parse_step_text("@sugar( 2 , cups )"),
            vec![ingredient("sugar", "2", "cups")]
        );
    }

    #[test]
    fn test_missing_unit_defaults_to_empty() {
        assert_eq!(parse_step_text("@salt(1)"), vec![ingredient("salt", "1", "")]);
        assert_eq!(parse_step_text("@salt()"), vec![ingredient("salt", "", "")]);
    }

    #[test]
    fn test_extra_params_are_ignored() {
        assert_eq!(
            parse_step_text("@salt(1,pinch,extra)"),
            vec![ingredient("salt", "1", "pinch")]
        );
    }

    #[test]
    fn test_name_may_contain_spaces() {
        assert_eq!(
            parse_step_text("@olive oil(2,tbsp)"),
            vec![ingredient("olive oil", "2", "tbsp")]
        );
    }

    #[test]
    fn test_unterminated_params_degrade_to_text() {
        assert_eq!(
            parse_step_text("Add @flour(200,g"),
            vec![text("Add @flour(200,g")]
        );
    }

    #[test]
    fn test_unterminated_name_degrades_to_text() {
        assert_eq!(parse_step_text("Add @flour"), vec![text("Add @flour")]);
    }

    #[test]
    fn test_blank_name_keeps_tag_and_resumes() {
        assert_eq!(
            parse_step_text("a @(1,g) b @salt(1,)"),
            vec![text("a @(1,g) b "), ingredient("salt", "1", "")]
        );
    }

    #[test]
    fn test_whitespace_name_is_blank() {
        assert_eq!(parse_step_text("@  (1,g)"), vec![text("@  (1,g)")]);
    }

    #[test]
    fn test_adjacent_tags() {
        assert_eq!(
            parse_step_text("@flour(200,g)@water(100,ml)"),
            vec![
                ingredient("flour", "200", "g"),
                ingredient("water", "100", "ml"),
            ]
        );
    }

    #[test]
    fn test_multibyte_text_around_tags() {
        assert_eq!(
            parse_step_text("Préchauffez, ajoutez @beurre(30,g) doucement"),
            vec![
                text("Préchauffez, ajoutez "),
                ingredient("beurre", "30", "g"),
                text(" doucement"),
            ]
        );
    }

    #[test]
    fn test_extract_names_deduplicates_and_normalizes() {
        assert_eq!(
            extract_ingredient_names("@Flour(200,g) then @flour(,) and @Water(1,l)"),
            vec!["flour".to_string(), "water".to_string()]
        );
    }

    #[test]
    fn test_extract_names_skips_malformed() {
        assert_eq!(
            extract_ingredient_names("@(1,g) @flour(200,g) @broken(1"),
            vec!["flour".to_string()]
        );
    }
}
