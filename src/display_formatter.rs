//! # Display Formatter
//!
//! Chooses a human friendly unit for each aggregated bucket, converts the
//! standardized quantity into it and renders the strings shown to the user.
//!
//! ## Unit selection
//!
//! [`DISPLAY_RULES`] are tried in order. Each rule may propose a unit, and
//! the first proposal that can actually express the bucket's quantity wins:
//!
//! 1. count units in the original recipe (`2 cloves garlic`)
//! 2. the preferred unit table (flour in cups, salt in teaspoons, ...)
//! 3. count words or discrete foods in the name (`eggs`, `celery stalks`)
//! 4. magnitude thresholds for liquids and solids
//!
//! When no proposal fits, the standard unit itself is used, scaled up to
//! liters or kilograms from 1000.
//!
//! ## Usage
//!
//! ```rust
//! use grocery::display_formatter::format_quantity;
//! use grocery::ingredient_model::DisplayUnit;
//!
//! assert_eq!(format_quantity(0.5, &DisplayUnit::Teaspoon, 0.01), "1/2");
//! assert_eq!(format_quantity(12.34, &DisplayUnit::Gram, 0.01), "12.3");
//! assert_eq!(format_quantity(3.0, &DisplayUnit::Count, 0.01), "3");
//! ```

use crate::aggregator::AggregatedBucket;
use crate::ingredient_model::{DisplayUnit, StdUnit};
use crate::reference_tables::{
    count_unit_singular, density_for, is_count_unit, preferred_unit, CUP_STAPLES, DISCRETE_FOODS,
    EXPLICIT_COUNT_WORDS,
};
use crate::unit_converter::{can_convert, convert_from_standard};
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

/// Common fractions shown instead of decimals below 10
const FRACTIONS: &[(f64, &str)] = &[
    (0.25, "1/4"),
    (0.5, "1/2"),
    (0.75, "3/4"),
    (1.0 / 3.0, "1/3"),
    (2.0 / 3.0, "2/3"),
];

/// Liquid thresholds in milliliters
const LIQUID_TEASPOON_LIMIT: f64 = 15.0;
const LIQUID_TABLESPOON_LIMIT: f64 = 60.0;
const LIQUID_CUP_LIMIT: f64 = 1000.0;

/// Solid thresholds in grams
const SOLID_TEASPOON_LIMIT: f64 = 10.0;
const SOLID_TABLESPOON_LIMIT: f64 = 30.0;
const SOLID_CUP_LIMIT: f64 = 500.0;

/// Below these, positive amounts would round to zero
const SMALLEST_AMOUNT: f64 = 0.005;
const SMALLEST_COUNT: f64 = 0.05;

/// Quantities from this size up switch to liters or kilograms
const LARGE_UNIT_THRESHOLD: f64 = 1000.0;

lazy_static! {
    static ref COUNT_WORD_REGEX: Regex = Regex::new(
        r"(?i)\b(?:cans?|stalks?|slices?|cloves?|bunch(?:es)?|sprigs?|leaf|leaves|ears?|heads?|loaf|loaves|whole|pieces?)\b"
    )
    .expect("Count word pattern should be valid");
}

/// One step of display unit selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRule {
    /// The recipe wrote the ingredient with a count unit, or it is counted already
    CountMeasure,
    /// The ingredient has an entry in the preferred unit table
    PreferredUnit,
    /// The name mentions a count word or a food bought by the piece
    CountPattern,
    /// Pick by size: teaspoons up to liters, or teaspoons up to kilograms
    Magnitude,
}

/// Display rules in evaluation order
pub const DISPLAY_RULES: &[DisplayRule] = &[
    DisplayRule::CountMeasure,
    DisplayRule::PreferredUnit,
    DisplayRule::CountPattern,
    DisplayRule::Magnitude,
];

impl DisplayRule {
    /// The unit this rule proposes for a bucket, if any
    pub fn propose(&self, bucket: &AggregatedBucket) -> Option<DisplayUnit> {
        let name = bucket.normalized_name.as_str();
        match self {
            DisplayRule::CountMeasure => {
                let counted =
                    bucket.std_unit == StdUnit::Count || is_count_unit(&bucket.original_unit);
                counted.then_some(DisplayUnit::Count)
            }
            DisplayRule::PreferredUnit => preferred_unit(name),
            DisplayRule::CountPattern => {
                let counted = COUNT_WORD_REGEX.is_match(name)
                    || DISCRETE_FOODS.iter().any(|food| name.contains(food));
                counted.then_some(DisplayUnit::Count)
            }
            DisplayRule::Magnitude => magnitude_unit(bucket),
        }
    }
}

/// Everything needed to show one bucket
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub unit: DisplayUnit,
    /// Quantity in `unit`
    pub amount: f64,
    pub formatted_amount: String,
    pub display_text: String,
    pub standardized_display: String,
}

/// Pick the display unit for a bucket
pub fn select_display_unit(bucket: &AggregatedBucket) -> DisplayUnit {
    if let StdUnit::Unconverted(unit) = &bucket.std_unit {
        return DisplayUnit::Unconverted(unit.clone());
    }

    for rule in DISPLAY_RULES {
        let Some(proposal) = rule.propose(bucket) else {
            continue;
        };
        if can_convert(&bucket.std_unit, &proposal, &bucket.normalized_name) {
            trace!(
                "Display unit for '{}' from {:?}: {}",
                bucket.key,
                rule,
                proposal.token()
            );
            return proposal;
        }
        trace!(
            "{:?} proposed {} for '{}' but {} cannot be expressed in it",
            rule,
            proposal.token(),
            bucket.key,
            bucket.std_unit
        );
    }

    fallback_unit(&bucket.std_unit, bucket.std_quantity)
}

/// Convert and render a bucket
///
/// # Arguments
///
/// * `bucket` - The aggregated ingredient
/// * `tolerance` - Maximum distance for snapping to a common fraction
pub fn present(bucket: &AggregatedBucket, tolerance: f64) -> Presentation {
    let mut unit = select_display_unit(bucket);
    let mut amount = amount_in(bucket, &unit);
    let mut formatted_amount = format_quantity(amount, &unit, tolerance);

    // Too small for the chosen unit, show it in the standard unit instead
    if is_below_precision(&formatted_amount) {
        let fallback = fallback_unit(&bucket.std_unit, bucket.std_quantity);
        debug!(
            "{} {} of '{}' rounds away in {}, showing it in {}",
            bucket.std_quantity,
            bucket.std_unit,
            bucket.key,
            unit.token(),
            fallback.token()
        );
        amount = amount_in(bucket, &fallback);
        formatted_amount = format_quantity(amount, &fallback, tolerance);
        unit = fallback;
    }

    let display_text = collapse_repeated_words(&display_text(bucket, &unit, &formatted_amount));

    let std_counted = bucket.std_unit == StdUnit::Count;
    let std_amount = format_amount(bucket.std_quantity, std_counted, tolerance);
    let standardized_display = if std_counted {
        format!("{} {}", std_amount, bucket.clean_name)
    } else {
        format!("{} {} {}", std_amount, bucket.std_unit, bucket.clean_name)
    };

    Presentation {
        unit,
        amount,
        formatted_amount,
        display_text,
        standardized_display,
    }
}

fn amount_in(bucket: &AggregatedBucket, unit: &DisplayUnit) -> f64 {
    convert_from_standard(
        bucket.std_quantity,
        &bucket.std_unit,
        unit,
        &bucket.normalized_name,
    )
    .unwrap_or(bucket.std_quantity)
}

fn is_below_precision(formatted_amount: &str) -> bool {
    formatted_amount.starts_with('<')
}

/// Format a quantity for display in the given unit
///
/// Counts show as integers, or with one decimal when fractional. Other
/// quantities below 10 snap to 1/4, 1/2, 3/4, 1/3 or 2/3 within `tolerance`
/// and otherwise keep up to two decimals; larger ones keep one decimal.
/// A positive quantity that would round to zero shows as "<0.1" for counts
/// and "<0.01" otherwise.
pub fn format_quantity(quantity: f64, unit: &DisplayUnit, tolerance: f64) -> String {
    format_amount(quantity, *unit == DisplayUnit::Count, tolerance)
}

fn format_amount(quantity: f64, counted: bool, tolerance: f64) -> String {
    if counted {
        if (quantity - quantity.round()).abs() < 1e-9 {
            return format!("{}", quantity.round() as i64);
        }
        if quantity > 0.0 && quantity < SMALLEST_COUNT {
            return "<0.1".to_string();
        }
        return format!("{:.1}", quantity);
    }

    if quantity > 0.0 && quantity < SMALLEST_AMOUNT {
        return "<0.01".to_string();
    }

    if quantity < 10.0 {
        if let Some((_, fraction)) = FRACTIONS
            .iter()
            .find(|(value, _)| (quantity - value).abs() < tolerance)
        {
            return fraction.to_string();
        }
        return strip_trailing_zeros(format!("{:.2}", quantity));
    }

    strip_trailing_zeros(format!("{:.1}", quantity))
}

fn strip_trailing_zeros(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Remove a word that repeats the word right before it ("Slices of of Bread")
pub fn collapse_repeated_words(text: &str) -> String {
    let mut words: Vec<&str> = Vec::new();
    for word in text.split_whitespace() {
        match words.last() {
            Some(previous) if previous.eq_ignore_ascii_case(word) => continue,
            _ => words.push(word),
        }
    }
    words.join(" ")
}

fn display_text(bucket: &AggregatedBucket, unit: &DisplayUnit, formatted_amount: &str) -> String {
    if *unit != DisplayUnit::Count {
        return format!(
            "{} {} {}",
            formatted_amount,
            unit.abbreviation(),
            bucket.clean_name
        );
    }

    match explicit_count_word(bucket) {
        Some(word) => {
            let remaining = remove_count_word(&bucket.clean_name, word);
            if remaining.is_empty() {
                return format!("{} {}", formatted_amount, bucket.clean_name);
            }
            let label = if formatted_amount == "1" {
                capitalize(word)
            } else {
                capitalize(&pluralize(word))
            };
            format!("{} {} of {}", formatted_amount, label, remaining)
        }
        None => format!("{} {}", formatted_amount, bucket.clean_name),
    }
}

/// Explicit count word from the original unit or the ingredient name
fn explicit_count_word(bucket: &AggregatedBucket) -> Option<&'static str> {
    let from_unit = count_unit_singular(&bucket.original_unit)
        .filter(|word| EXPLICIT_COUNT_WORDS.contains(word));
    from_unit.or_else(|| {
        bucket
            .normalized_name
            .split_whitespace()
            .filter_map(count_unit_singular)
            .find(|word| EXPLICIT_COUNT_WORDS.contains(word))
    })
}

fn remove_count_word(name: &str, word: &str) -> String {
    name.split_whitespace()
        .filter(|token| count_unit_singular(token) != Some(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn pluralize(word: &str) -> String {
    if word.ends_with("ch") || word.ends_with("sh") {
        format!("{}es", word)
    } else {
        format!("{}s", word)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn magnitude_unit(bucket: &AggregatedBucket) -> Option<DisplayUnit> {
    let name = bucket.normalized_name.as_str();
    let density = density_for(name);

    let volume_ml = match bucket.std_unit {
        StdUnit::Milliliters => Some(bucket.std_quantity),
        StdUnit::Grams if bucket.is_liquid => density.map(|d| bucket.std_quantity / d),
        _ => None,
    };

    if let Some(ml) = volume_ml {
        let unit = if ml < LIQUID_TEASPOON_LIMIT {
            DisplayUnit::Teaspoon
        } else if ml < LIQUID_TABLESPOON_LIMIT {
            DisplayUnit::Tablespoon
        } else if ml < LIQUID_CUP_LIMIT {
            DisplayUnit::Cup
        } else {
            DisplayUnit::Liter
        };
        return Some(unit);
    }

    if bucket.std_unit != StdUnit::Grams {
        return None;
    }

    let grams = bucket.std_quantity;
    let unit = if grams < SOLID_TEASPOON_LIMIT {
        DisplayUnit::Teaspoon
    } else if grams < SOLID_TABLESPOON_LIMIT {
        DisplayUnit::Tablespoon
    } else if grams < SOLID_CUP_LIMIT {
        if CUP_STAPLES.contains(&name) {
            DisplayUnit::Cup
        } else {
            DisplayUnit::Gram
        }
    } else {
        DisplayUnit::Kilogram
    };
    Some(unit)
}

fn fallback_unit(std_unit: &StdUnit, quantity: f64) -> DisplayUnit {
    match std_unit {
        StdUnit::Milliliters if quantity >= LARGE_UNIT_THRESHOLD => DisplayUnit::Liter,
        StdUnit::Milliliters => DisplayUnit::Milliliter,
        StdUnit::Grams if quantity >= LARGE_UNIT_THRESHOLD => DisplayUnit::Kilogram,
        StdUnit::Grams => DisplayUnit::Gram,
        StdUnit::Count => DisplayUnit::Count,
        StdUnit::Unconverted(unit) => DisplayUnit::Unconverted(unit.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn bucket(name: &str, clean: &str, quantity: f64, unit: StdUnit, original: &str) -> AggregatedBucket {
        AggregatedBucket {
            key: name.to_string(),
            normalized_name: name.to_string(),
            clean_name: clean.to_string(),
            std_quantity: quantity,
            std_unit: unit,
            original_unit: original.to_string(),
            is_liquid: crate::reference_tables::is_liquid(name),
            recipe_ids: BTreeSet::from(["r1".to_string()]),
        }
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_quantity(2.0, &DisplayUnit::Count, 0.01), "2");
        assert_eq!(format_quantity(1.5, &DisplayUnit::Count, 0.01), "1.5");
    }

    #[test]
    fn test_format_fractions() {
        assert_eq!(format_quantity(0.25, &DisplayUnit::Cup, 0.01), "1/4");
        assert_eq!(format_quantity(0.505, &DisplayUnit::Cup, 0.01), "1/2");
        assert_eq!(format_quantity(0.333, &DisplayUnit::Cup, 0.01), "1/3");
        assert_eq!(format_quantity(0.67, &DisplayUnit::Cup, 0.01), "2/3");
        assert_eq!(format_quantity(0.4, &DisplayUnit::Cup, 0.01), "0.4");
    }

    #[test]
    fn test_format_decimals() {
        assert_eq!(format_quantity(3.0, &DisplayUnit::Cup, 0.01), "3");
        assert_eq!(format_quantity(1.126, &DisplayUnit::Cup, 0.01), "1.13");
        assert_eq!(format_quantity(2.999, &DisplayUnit::Cup, 0.01), "3");
        assert_eq!(format_quantity(125.0, &DisplayUnit::Gram, 0.01), "125");
        assert_eq!(format_quantity(10.46, &DisplayUnit::Gram, 0.01), "10.5");
    }

    #[test]
    fn test_tiny_amounts_never_print_as_zero() {
        assert_eq!(format_quantity(0.0042, &DisplayUnit::Cup, 0.01), "<0.01");
        assert_eq!(format_quantity(0.02, &DisplayUnit::Count, 0.01), "<0.1");
        assert_eq!(format_quantity(0.006, &DisplayUnit::Cup, 0.01), "0.01");
    }

    #[test]
    fn test_tiny_amount_falls_back_to_standard_unit() {
        let milk = bucket("milk", "Milk", 1.0, StdUnit::Milliliters, "ml");
        let shown = present(&milk, 0.01);
        assert_eq!(shown.unit, DisplayUnit::Milliliter);
        assert_eq!(shown.formatted_amount, "1");
        assert_eq!(shown.display_text, "1 ml Milk");
    }

    #[test]
    fn test_collapse_repeated_words() {
        assert_eq!(collapse_repeated_words("2 Slices of of Bread"), "2 Slices of Bread");
        assert_eq!(collapse_repeated_words("1 tsp Tsp Salt"), "1 tsp Salt");
        assert_eq!(collapse_repeated_words("1 cup Milk"), "1 cup Milk");
    }

    #[test]
    fn test_count_from_original_unit() {
        let garlic = bucket("garlic", "Garlic", 3.0, StdUnit::Count, "cloves");
        let shown = present(&garlic, 0.01);
        assert_eq!(shown.unit, DisplayUnit::Count);
        assert_eq!(shown.display_text, "3 Cloves of Garlic");
        assert_eq!(shown.standardized_display, "3 Garlic");
    }

    #[test]
    fn test_single_count_word_is_singular() {
        let bread = bucket("bread", "Bread", 1.0, StdUnit::Count, "slice");
        assert_eq!(present(&bread, 0.01).display_text, "1 Slice of Bread");

        let cilantro = bucket("cilantro", "Cilantro", 2.0, StdUnit::Count, "bunches");
        assert_eq!(present(&cilantro, 0.01).display_text, "2 Bunches of Cilantro");
    }

    #[test]
    fn test_count_word_in_name() {
        let celery = bucket("celery stalks", "Celery Stalks", 4.0, StdUnit::Count, "");
        assert_eq!(present(&celery, 0.01).display_text, "4 Stalks of Celery");
    }

    #[test]
    fn test_plain_count() {
        let eggs = bucket("eggs", "Eggs", 2.0, StdUnit::Count, "");
        let shown = present(&eggs, 0.01);
        assert_eq!(shown.unit.token(), "count");
        assert_eq!(shown.formatted_amount, "2");
        assert_eq!(shown.display_text, "2 Eggs");
    }

    #[test]
    fn test_preferred_unit_through_density() {
        // 1/2 tsp salt standardizes to grams
        let grams = 0.5 * 4.93 * 1.22;
        let salt = bucket("salt", "Salt", grams, StdUnit::Grams, "tsp");
        let shown = present(&salt, 0.01);
        assert_eq!(shown.unit, DisplayUnit::Teaspoon);
        assert_eq!(shown.formatted_amount, "1/2");
        assert_eq!(shown.display_text, "1/2 tsp Salt");
    }

    #[test]
    fn test_count_proposal_needs_count_quantity() {
        // 2 cups of diced tomatoes stay in volume
        let tomatoes = bucket("tomatoes", "Tomatoes", 473.18, StdUnit::Milliliters, "cups");
        let shown = present(&tomatoes, 0.01);
        assert_eq!(shown.unit, DisplayUnit::Cup);
        assert_eq!(shown.formatted_amount, "2");
    }

    #[test]
    fn test_liquid_thresholds() {
        let cases = [
            (10.0, DisplayUnit::Teaspoon),
            (30.0, DisplayUnit::Tablespoon),
            (250.0, DisplayUnit::Cup),
            (1500.0, DisplayUnit::Liter),
        ];
        for (ml, expected) in cases {
            let stock = bucket("chicken stock", "Chicken Stock", ml, StdUnit::Milliliters, "ml");
            assert_eq!(select_display_unit(&stock), expected, "for {} ml", ml);
        }
    }

    #[test]
    fn test_solid_thresholds() {
        let chicken = bucket("chicken breast", "Chicken Breast", 450.0, StdUnit::Grams, "g");
        assert_eq!(select_display_unit(&chicken), DisplayUnit::Gram);

        let chicken = bucket("chicken breast", "Chicken Breast", 900.0, StdUnit::Grams, "lb");
        let shown = present(&chicken, 0.01);
        assert_eq!(shown.unit, DisplayUnit::Kilogram);
        assert_eq!(shown.display_text, "0.9 kg Chicken Breast");
        assert_eq!(shown.standardized_display, "900 g Chicken Breast");

        // teaspoons need a density, so small amounts without one stay in grams
        let chili = bucket("chili flakes", "Chili Flakes", 5.0, StdUnit::Grams, "g");
        assert_eq!(select_display_unit(&chili), DisplayUnit::Gram);
    }

    #[test]
    fn test_unconverted_unit_is_kept() {
        let salt = bucket("salt", "Salt", 2.0, StdUnit::Unconverted("pinch".to_string()), "pinch");
        let shown = present(&salt, 0.01);
        assert_eq!(shown.unit.token(), "pinch");
        assert_eq!(shown.display_text, "2 pinch Salt");
        assert_eq!(shown.standardized_display, "2 pinch Salt");
    }

    #[test]
    fn test_rules_are_ordered() {
        assert_eq!(DISPLAY_RULES.first(), Some(&DisplayRule::CountMeasure));
        assert_eq!(DISPLAY_RULES.last(), Some(&DisplayRule::Magnitude));
    }
}
