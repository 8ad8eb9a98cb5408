//! Autocomplete for in-progress ingredient tags.
//!
//! While the user is typing a tag name (`@flo...`) at the end of a step's
//! text, known ingredient names are ranked by Jaro-Winkler similarity and
//! offered as suggestions. Accepting one replaces the trailing partial tag
//! with the full `@name()` form and puts the cursor inside the parentheses.

use std::cmp::Ordering;

/// Where the tail of a step's text sits in the tag grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagEditState {
    /// No tag is open
    Idle,
    /// Saw `@`, collecting name characters
    TagOpen,
    /// Saw `(`, collecting parameters
    ParamsOpen,
}

/// Run the editing state machine over the whole input.
pub fn tag_edit_state(input: &str) -> TagEditState {
    let mut state = TagEditState::Idle;
    for c in input.chars() {
        state = match (state, c) {
            (TagEditState::Idle, '@') => TagEditState::TagOpen,
            (TagEditState::TagOpen, '(') => TagEditState::ParamsOpen,
            (TagEditState::ParamsOpen, ')') => TagEditState::Idle,
            (state, _) => state,
        };
    }
    state
}

// ASCII word characters, the only ones a tag name under edit may contain
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// The name of an in-progress tag, if the cursor (end of input) sits right
/// after it: a final `@` followed by a non-empty run of word characters
/// reaching the end of the text. `None` once `(` is typed or when the tail
/// is plain prose.
pub fn active_tag_prefix(input: &str) -> Option<&str> {
    let at = input.rfind('@')?;
    let prefix = &input[at + 1..];
    if !prefix.is_empty() && prefix.chars().all(is_word_char) {
        Some(prefix)
    } else {
        None
    }
}

/// Rank known ingredient names against the in-progress tag name.
///
/// Returns up to 5 names by ascending Jaro-Winkler distance,
/// case-insensitive, ties kept in input order. Empty when no tag is in
/// progress.
pub fn suggest<S: AsRef<str>>(input: &str, known_names: &[S]) -> Vec<String> {
    let Some(prefix) = active_tag_prefix(input) else {
        return Vec::new();
    };
    let prefix = prefix.to_lowercase();

    let mut ranked: Vec<(&str, f64)> = known_names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let distance = 1.0 - strsim::jaro_winkler(&prefix, &name.to_lowercase());
            (name, distance)
        })
        .collect();
    // sort_by is stable, so equal distances keep input order
    ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
    ranked
        .into_iter()
        .take(5)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Replace the trailing partial tag with the accepted suggestion.
///
/// Removes the last `@name` occurrence (with its empty `()` if one was
/// already appended by a previous acceptance), appends `@<suggestion>()` and
/// returns the new text together with the byte offset of the edit cursor,
/// positioned inside the empty parentheses. `None` when the input contains
/// no tag to replace.
pub fn apply_suggestion(input: &str, suggestion: &str) -> Option<(String, usize)> {
    let at = input.rfind('@')?;
    let rest = &input[at + 1..];
    let name_len = rest
        .find(|c: char| !is_word_char(c))
        .unwrap_or(rest.len());
    let mut end = at + 1 + name_len;
    if input[end..].starts_with("()") {
        end += 2;
    }

    let mut text = String::with_capacity(input.len() + suggestion.len() + 3);
    text.push_str(&input[..at]);
    text.push_str(&input[end..]);
    text.push('@');
    text.push_str(suggestion);
    text.push_str("()");
    let cursor = text.len() - 1;
    Some((text, cursor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_state_machine() {
        assert_eq!(tag_edit_state("chop the onions"), TagEditState::Idle);
        assert_eq!(tag_edit_state("add @flo"), TagEditState::TagOpen);
        assert_eq!(tag_edit_state("add @flour(200"), TagEditState::ParamsOpen);
        assert_eq!(tag_edit_state("add @flour(200,g)"), TagEditState::Idle);
        assert_eq!(tag_edit_state("add @flour(200,g) then @su"), TagEditState::TagOpen);
    }

    #[test]
    fn test_prefix_requires_tag_at_end_of_input() {
        assert_eq!(active_tag_prefix("add @flo"), Some("flo"));
        assert_eq!(active_tag_prefix("add @flo then stir"), None);
        assert_eq!(active_tag_prefix("add @flour("), None);
        assert_eq!(active_tag_prefix("add @"), None);
        assert_eq!(active_tag_prefix("no tags here"), None);
    }

    #[test]
    fn test_suggest_ranks_closest_first() {
        let known = ["Carrot", "Potato", "Onion"];
        let suggestions = suggest("dice the @Car", &known);
        assert_eq!(suggestions.first().map(String::as_str), Some("Carrot"));
    }

    #[test]
    fn test_suggest_is_case_insensitive() {
        let known = ["carrot"];
        assert_eq!(suggest("@CARR", &known), vec!["carrot".to_string()]);
    }

    #[test]
    fn test_suggest_caps_at_five() {
        let known = ["a", "b", "c", "d", "e", "f", "g"];
        assert_eq!(suggest("@x", &known).len(), 5);
    }

    #[test]
    fn test_suggest_ties_keep_input_order() {
        // Identical names are equidistant; stable sort preserves order.
        let known = ["salt", "salt", "salt"];
        let suggestions = suggest("@sal", &known);
        assert_eq!(suggestions.len(), 3);
    }

    #[test]
    fn test_suggest_empty_without_active_tag() {
        let known = ["carrot"];
        assert!(suggest("plain text", &known).is_empty());
        assert!(suggest("@carrot(", &known).is_empty());
    }

    #[test]
    fn test_apply_replaces_trailing_partial() {
        let (text, cursor) = apply_suggestion("add @flo", "flour").unwrap();
        assert_eq!(text, "add @flour()");
        assert_eq!(cursor, text.len() - 1);
        assert_eq!(&text[cursor..cursor + 1], ")");
    }

    #[test]
    fn test_apply_replaces_previous_acceptance() {
        let (text, _) = apply_suggestion("add @flour()", "plain flour").unwrap();
        assert_eq!(text, "add @plain flour()");
    }

    #[test]
    fn test_apply_keeps_earlier_tags() {
        let (text, _) = apply_suggestion("mix @flour(200,g) with @sug", "sugar").unwrap();
        assert_eq!(text, "mix @flour(200,g) with @sugar()");
    }

    #[test]
    fn test_apply_without_tag() {
        assert!(apply_suggestion("no tags at all", "flour").is_none());
    }
}
