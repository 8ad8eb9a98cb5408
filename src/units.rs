//! Unit canonicalization and quantity formatting.
//!
//! Units are keyed internally by a canonical plural form ("grams",
//! "litres"). Common metric units render with an abutting shorthand
//! ("30g"); spoon units keep a separating space ("3 tsp"); units without a
//! shorthand use the grammatical singular when the quantity starts with 1 or
//! 0, and pass through untouched when unregistered.

use std::collections::HashMap;

use once_cell::sync::Lazy;

static UNIT_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("g", "grams"),
        ("gram", "grams"),
        ("grams", "grams"),
        ("kg", "kilograms"),
        ("kilogram", "kilograms"),
        ("kilograms", "kilograms"),
        ("ml", "millilitres"),
        ("millilitre", "millilitres"),
        ("millilitres", "millilitres"),
        ("l", "litres"),
        ("litre", "litres"),
        ("litres", "litres"),
        ("tsp", "teaspoons"),
        ("teaspoon", "teaspoons"),
        ("teaspoons", "teaspoons"),
        ("tbsp", "tablespoons"),
        ("tablespoon", "tablespoons"),
        ("tablespoons", "tablespoons"),
        ("oz", "ounces"),
        ("ounce", "ounces"),
        ("ounces", "ounces"),
        ("cup", "cups"),
        ("cups", "cups"),
        ("", ""),
    ])
});

static SINGULAR_UNITS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("grams", "gram"),
        ("kilograms", "kilogram"),
        ("millilitres", "millilitre"),
        ("litres", "litre"),
        ("teaspoons", "teaspoon"),
        ("tablespoons", "tablespoon"),
        ("ounces", "ounce"),
        ("cups", "cup"),
    ])
});

// Spoon shorthands carry their separating space; metric ones abut the
// quantity ("30g" vs "3 tsp").
static SHORTHAND_UNITS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("grams", "g"),
        ("kilograms", "kg"),
        ("millilitres", "ml"),
        ("litres", "l"),
        ("teaspoons", " tsp"),
        ("tablespoons", " tbsp"),
        ("ounces", "oz"),
    ])
});

/// Map a raw unit to its canonical plural form.
///
/// Lookup is case-insensitive and ignores surrounding whitespace; an
/// unrecognized unit passes through exactly as given.
pub fn canonical_unit(raw: &str) -> String {
    match UNIT_ALIASES.get(raw.trim().to_lowercase().as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => raw.to_string(),
    }
}

/// Render an ingredient reference for display.
pub fn format_ingredient(name: &str, quantity: &str, raw_unit: &str) -> String {
    let canonical = canonical_unit(raw_unit);

    // Add flour...
    if canonical.trim().is_empty() && quantity.trim().is_empty() {
        return name.to_string();
    }

    // add flour (30g)
    if let Some(short) = SHORTHAND_UNITS.get(canonical.as_str()) {
        return format!("{} ({}{})", name, quantity, short);
    }

    if quantity.starts_with('1') || quantity.starts_with('0') {
        // add flour (1 cup), or (1 smidge) for an unregistered unit
        return match SINGULAR_UNITS.get(canonical.as_str()) {
            Some(singular) => format!("{} ({} {})", name, quantity, singular),
            None => format!("{} ({} {})", name, quantity, canonical),
        };
    }

    // add flour (3 cups)
    format!("{} ({} {})", name, quantity, canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_is_case_insensitive() {
        for raw in ["G", "g", "gram", "grams", " Grams "] {
            assert_eq!(canonical_unit(raw), "grams");
        }
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        for canonical in ["grams", "kilograms", "millilitres", "litres", "cups"] {
            assert_eq!(canonical_unit(canonical), canonical);
        }
    }

    #[test]
    fn test_canonicalize_empty_and_unknown() {
        assert_eq!(canonical_unit(""), "");
        assert_eq!(canonical_unit("smidge"), "smidge");
        assert_eq!(canonical_unit("Smidge"), "Smidge");
    }

    #[test]
    fn test_format_bare_name() {
        assert_eq!(format_ingredient("Flour", "", ""), "Flour");
    }

    #[test]
    fn test_format_shorthand_abuts_quantity() {
        assert_eq!(format_ingredient("Flour", "30", "g"), "Flour (30g)");
        assert_eq!(format_ingredient("Flour", "2", "kilograms"), "Flour (2kg)");
        assert_eq!(format_ingredient("Milk", "250", "ml"), "Milk (250ml)");
    }

    #[test]
    fn test_format_spoon_shorthand_keeps_space() {
        assert_eq!(format_ingredient("Vanilla", "3", "tsp"), "Vanilla (3 tsp)");
        assert_eq!(format_ingredient("Oil", "2", "tablespoons"), "Oil (2 tbsp)");
    }

    #[test]
    fn test_format_singular_for_quantity_of_one() {
        assert_eq!(format_ingredient("Sugar", "1", "cup"), "Sugar (1 cup)");
        assert_eq!(format_ingredient("Sugar", "0.5", "cups"), "Sugar (0.5 cup)");
    }

    #[test]
    fn test_format_plural_otherwise() {
        assert_eq!(format_ingredient("Sugar", "3", "cup"), "Sugar (3 cups)");
    }

    #[test]
    fn test_format_unregistered_unit_passes_through() {
        assert_eq!(format_ingredient("Salt", "1", "smidge"), "Salt (1 smidge)");
        assert_eq!(format_ingredient("Salt", "2", "smidges"), "Salt (2 smidges)");
    }
}
