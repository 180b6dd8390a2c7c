//! # Measurement Patterns Module
//!
//! This module contains regex patterns and constants used for quantity and unit detection.

use lazy_static::lazy_static;
use regex::Regex;

/// Leading amount: ranges, mixed numbers, fractions, decimals, integers and Unicode fraction glyphs
pub const QUANTITY_PATTERN: &str = r"\d+(?:\.\d+)?\s*(?:-|–|to)\s*\d+(?:\.\d+)?|\d+\s+\d+/\d+|\d+\s*[½⅓⅔¼¾]|\d+/\d+|\d*\.\d+|\d+|[½⅓⅔¼¾]";

/// Unit spellings recognized right after an amount, longest alternatives first
pub const UNIT_PATTERN: &str = r"fl\.?\s*oz|fluid\s+ounces?|teaspoons?|tsps?|tablespoons?|tbsps?|tbs|cups?|c|pints?|pt|quarts?|qt|gallons?|gal|millilit(?:er|re)s?|ml|lit(?:er|re)s?|l|kilograms?|kg|grams?|g|ounces?|oz|pounds?|lbs?|cans?|slices?|stalks?|cloves?|bunch(?:es)?|sprigs?|leaf|leaves|ears?|heads?|loaf|loaves|whole|pieces?|pinch(?:es)?|dash(?:es)?|packages?|pkg|sticks?";

lazy_static! {
    /// Full ingredient line: `<amount> [<unit>] <name>`
    pub static ref INGREDIENT_LINE_REGEX: Regex = Regex::new(&format!(
        r"(?i)^\s*(?P<qty>{})(?:\s*(?P<unit>{})\.?)?(?:\s+|$)(?P<name>.*)$",
        QUANTITY_PATTERN, UNIT_PATTERN
    ))
    .expect("Ingredient line pattern should be valid");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture<'a>(line: &'a str, group: &str) -> Option<&'a str> {
        INGREDIENT_LINE_REGEX
            .captures(line)
            .and_then(|c| c.name(group))
            .map(|m| m.as_str())
    }

    #[test]
    fn test_amount_and_unit() {
        assert_eq!(capture("2 cups flour", "qty"), Some("2"));
        assert_eq!(capture("2 cups flour", "unit"), Some("cups"));
        assert_eq!(capture("2 cups flour", "name"), Some("flour"));
    }

    #[test]
    fn test_unit_attached_to_number() {
        assert_eq!(capture("500g butter", "qty"), Some("500"));
        assert_eq!(capture("500g butter", "unit"), Some("g"));
        assert_eq!(capture("500g butter", "name"), Some("butter"));
    }

    #[test]
    fn test_unit_prefix_of_name_is_not_a_unit() {
        assert_eq!(capture("2 large eggs", "unit"), None);
        assert_eq!(capture("2 large eggs", "name"), Some("large eggs"));
        assert_eq!(capture("3 carrots", "unit"), None);
        assert_eq!(capture("1 garlic bulb", "unit"), None);
    }

    #[test]
    fn test_fraction_forms() {
        assert_eq!(capture("1 1/2 cups sugar", "qty"), Some("1 1/2"));
        assert_eq!(capture("½ tsp salt", "qty"), Some("½"));
        assert_eq!(capture("1½ cups milk", "qty"), Some("1½"));
        assert_eq!(capture("2-3 tbsp olive oil", "qty"), Some("2-3"));
        assert_eq!(capture("1 to 2 cups stock", "qty"), Some("1 to 2"));
    }

    #[test]
    fn test_no_leading_amount() {
        assert!(INGREDIENT_LINE_REGEX.captures("salt to taste").is_none());
    }
}
