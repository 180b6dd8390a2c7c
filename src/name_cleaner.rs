//! # Ingredient Name Cleaner
//!
//! Turns a raw ingredient name into a lowercase grouping key and a title-cased
//! display name by stripping quantity, preparation and qualifier noise.
//!
//! Cleaning is an ordered list of named [`CleaningRule`]s:
//!
//! 1. leading unit words ("stalks celery" -> "celery")
//! 2. leading preparation adjectives ("fresh", "chopped", ...)
//! 3. leading quantity and measurement phrases ("6-8 ", "2 cups ", "1 can of ", "(14 oz) ", "about ")
//! 4. trailing qualifiers (", divided", "(optional)", "plus more for serving")
//! 5. embedded numeric ranges
//! 6. whitespace and edge punctuation
//!
//! The rule sequence is re-applied until nothing changes, so cleaning an
//! already cleaned name is a no-op.
//!
//! ## Usage
//!
//! ```rust
//! use grocery::name_cleaner::clean_ingredient_name;
//!
//! let cleaned = clean_ingredient_name("2 cups fresh chopped parsley, for garnish");
//! assert_eq!(cleaned.key, "parsley");
//! assert_eq!(cleaned.display, "Parsley");
//! ```

use crate::measurement_patterns::UNIT_PATTERN;
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

/// Words kept lowercase when title-casing
const LOWERCASE_WORDS: &[&str] = &["and", "or", "of", "the", "with"];

/// Result of cleaning an ingredient name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedName {
    /// Lowercase key used to group ingredients across recipes
    pub key: String,
    /// Title-cased name for display
    pub display: String,
}

/// A single named cleaning step
#[derive(Debug)]
pub struct CleaningRule {
    name: &'static str,
    action: RuleAction,
}

#[derive(Debug)]
enum RuleAction {
    /// Remove every match of the pattern
    Strip(Regex),
    /// Collapse whitespace and trim stray punctuation at both ends
    Tidy,
}

impl CleaningRule {
    fn strip(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            action: RuleAction::Strip(
                Regex::new(pattern).expect("Cleaning rule pattern should be valid"),
            ),
        }
    }

    /// Rule name, for diagnostics and tests
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Apply this rule to lowercase text
    pub fn apply(&self, text: &str) -> String {
        match &self.action {
            RuleAction::Strip(pattern) => pattern.replace_all(text, "").into_owned(),
            RuleAction::Tidy => text
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .trim_matches(|c: char| c == ',' || c == ';' || c == ':' || c == '-' || c == ' ')
                .to_string(),
        }
    }
}

lazy_static! {
    static ref CLEANING_RULES: Vec<CleaningRule> = vec![
        CleaningRule::strip(
            "leading-count-unit",
            r"^(?:whole|pieces?|count|cans?|slices?|stalks?|cloves?|bunch(?:es)?|sprigs?|leaf|leaves|ears?|heads?|loaf|loaves)\b\s*",
        ),
        CleaningRule::strip(
            "leading-measure-word",
            r"^(?:teaspoons?|tablespoons?|tsp|tbsp|cups?|ounces?|grams?|milliliters?|liters?|pounds?|kilograms?)\b\.?\s*",
        ),
        CleaningRule::strip(
            "preparation-adjective",
            r"^(?:(?:fresh|frozen|dried|ground|chopped|sliced|diced|minced|grated|shredded|whole)\s+)+",
        ),
        CleaningRule::strip(
            "numeric-range-prefix",
            r"^[\d/.]+\s*(?:-|–|to)\s*[\d/.]+\s+",
        ),
        CleaningRule::strip(
            "measured-quantity-prefix",
            &format!(r"^[\d/.½⅓⅔¼¾]+\s*(?:{})\.?\s+(?:of\s+)?", UNIT_PATTERN),
        ),
        CleaningRule::strip("bare-number-prefix", r"^[\d/.½⅓⅔¼¾]+\s+"),
        CleaningRule::strip("leading-parenthetical", r"^\([^)]*\)\s*"),
        CleaningRule::strip(
            "filler-prefix",
            r"^(?:(?:for the|for|the|of|approximately|about|around|or so|to taste)\s+)+",
        ),
        CleaningRule::strip(
            "trailing-qualifier",
            r"(?:\s*,\s*|\s+)(?:divided|plus (?:more|extra) for \w+|plus more as needed|plus extra|optional|to serve|for serving|for garnish|for the top|for decoration|or to taste|to taste)$",
        ),
        CleaningRule::strip(
            "trailing-parenthetical",
            r"\s*,?\s*\(\s*(?:divided|optional|to serve|for serving|for garnish)\s*\)$",
        ),
        CleaningRule::strip(
            "trailing-preparation",
            r"\s*,\s*(?:sliced|chopped|diced|minced|grated)$",
        ),
        CleaningRule::strip("embedded-range", r"\b\d+\s*(?:-|to)\s*\d+\b"),
        CleaningRule {
            name: "tidy",
            action: RuleAction::Tidy,
        },
    ];
}

/// The ordered cleaning rules
pub fn cleaning_rules() -> &'static [CleaningRule] {
    &CLEANING_RULES
}

/// Clean an ingredient name into a grouping key and a display name
///
/// # Arguments
///
/// * `raw_name` - The ingredient name as it appears in the recipe
///
/// # Returns
///
/// A [`CleanedName`]; when cleaning strips everything, the trimmed
/// lowercase original serves as the key
pub fn clean_ingredient_name(raw_name: &str) -> CleanedName {
    let lowered = raw_name.to_lowercase();
    let mut key = lowered.clone();

    // Every rule only removes text, so this settles
    loop {
        let next = CLEANING_RULES
            .iter()
            .fold(key.clone(), |text, rule| rule.apply(&text));
        if next == key {
            break;
        }
        key = next;
    }

    if key.is_empty() {
        key = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    trace!("Cleaned ingredient name '{}' -> '{}'", raw_name, key);

    CleanedName {
        display: title_case(&key),
        key,
    }
}

/// Lowercase grouping key for an ingredient name
pub fn normalize_ingredient_name(raw_name: &str) -> String {
    clean_ingredient_name(raw_name).key
}

/// Capitalize each word, keeping conjunctions and prepositions lowercase
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            if LOWERCASE_WORDS.contains(&word) {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
