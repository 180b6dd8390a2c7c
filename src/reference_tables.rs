//! # Reference Tables
//!
//! Read-only lookup data shared by every stage of the pipeline: unit factors,
//! ingredient densities, liquid keywords, preferred display units and the
//! count vocabulary. The tables are plain statics so that adding a unit or an
//! ingredient never touches control flow.

use crate::ingredient_model::{DisplayUnit, Unit};

/// Milliliters per volume unit (US customary measures)
pub static VOLUME_TO_ML: &[(Unit, f64)] = &[
    (Unit::Teaspoon, 4.93),
    (Unit::Tablespoon, 14.79),
    (Unit::FluidOunce, 29.57),
    (Unit::Cup, 236.59),
    (Unit::Pint, 473.18),
    (Unit::Quart, 946.35),
    (Unit::Gallon, 3785.41),
    (Unit::Milliliter, 1.0),
    (Unit::Liter, 1000.0),
];

/// Grams per weight unit
pub static WEIGHT_TO_GRAMS: &[(Unit, f64)] = &[
    (Unit::Gram, 1.0),
    (Unit::Kilogram, 1000.0),
    (Unit::Ounce, 28.35),
    (Unit::Pound, 453.59),
];

/// Approximate densities in g/ml, matched by substring against the normalized name.
///
/// When several keys match, the longest one wins ("brown sugar" over "sugar").
pub static INGREDIENT_DENSITY: &[(&str, f64)] = &[
    ("water", 1.0),
    ("milk", 1.03),
    ("olive oil", 0.92),
    ("vegetable oil", 0.92),
    ("oil", 0.92),
    ("all-purpose flour", 0.53),
    ("flour", 0.53),
    ("brown sugar", 0.72),
    ("granulated sugar", 0.85),
    ("sugar", 0.85),
    ("salt", 1.22),
    ("butter", 0.91),
    ("honey", 1.42),
    ("maple syrup", 1.32),
    ("rice", 0.75),
    ("oats", 0.42),
    ("yogurt", 1.03),
];

/// Substrings marking an ingredient as a liquid
pub static LIQUID_KEYWORDS: &[&str] = &[
    "water", "milk", "juice", "oil", "vinegar", "wine", "beer", "stock", "broth", "cream",
    "sauce", "syrup", "honey", "liquor", "vodka", "whiskey",
];

/// Preferred display units, matched by substring in table order
pub static PREFERRED_UNITS: &[(&str, DisplayUnit)] = &[
    ("flour", DisplayUnit::Cup),
    ("sugar", DisplayUnit::Cup),
    ("oil", DisplayUnit::Tablespoon),
    ("butter", DisplayUnit::Tablespoon),
    ("salt", DisplayUnit::Teaspoon),
    ("milk", DisplayUnit::Cup),
    ("water", DisplayUnit::Cup),
    ("chocolate chips", DisplayUnit::Cup),
    ("oats", DisplayUnit::Cup),
    ("rice", DisplayUnit::Cup),
];

/// Count unit spellings mapped to their singular form. The empty word is a bare count.
pub static COUNT_UNIT_WORDS: &[(&str, &str)] = &[
    ("", ""),
    ("count", ""),
    ("whole", "whole"),
    ("piece", "piece"),
    ("pieces", "piece"),
    ("can", "can"),
    ("cans", "can"),
    ("slice", "slice"),
    ("slices", "slice"),
    ("stalk", "stalk"),
    ("stalks", "stalk"),
    ("clove", "clove"),
    ("cloves", "clove"),
    ("bunch", "bunch"),
    ("bunches", "bunch"),
    ("sprig", "sprig"),
    ("sprigs", "sprig"),
    ("leaf", "leaf"),
    ("leaves", "leaf"),
    ("ear", "ear"),
    ("ears", "ear"),
    ("head", "head"),
    ("heads", "head"),
    ("loaf", "loaf"),
    ("loaves", "loaf"),
];

/// Count unit words that read naturally as "{n} Cloves of Garlic"
pub static EXPLICIT_COUNT_WORDS: &[&str] = &["can", "slice", "stalk", "clove", "bunch", "sprig", "head"];

/// Foods that are bought as individual items
pub static DISCRETE_FOODS: &[&str] = &["egg", "banana", "apple", "orange", "potato", "onion", "tomato"];

/// Staples that are still shown in cups when measured by weight
pub static CUP_STAPLES: &[&str] = &["flour", "sugar", "rice", "oats"];

/// Milliliters in one unit of a volume measure
pub fn ml_per_unit(unit: &Unit) -> Option<f64> {
    VOLUME_TO_ML
        .iter()
        .find(|(candidate, _)| candidate == unit)
        .map(|(_, factor)| *factor)
}

/// Grams in one unit of a weight measure
pub fn grams_per_unit(unit: &Unit) -> Option<f64> {
    WEIGHT_TO_GRAMS
        .iter()
        .find(|(candidate, _)| candidate == unit)
        .map(|(_, factor)| *factor)
}

/// Density (g/ml) for an ingredient, using the longest matching key
pub fn density_for(normalized_name: &str) -> Option<f64> {
    INGREDIENT_DENSITY
        .iter()
        .filter(|(key, _)| normalized_name.contains(key))
        .max_by_key(|(key, _)| key.len())
        .map(|(_, density)| *density)
}

/// Whether the ingredient name indicates a liquid
pub fn is_liquid(normalized_name: &str) -> bool {
    LIQUID_KEYWORDS
        .iter()
        .any(|keyword| normalized_name.contains(keyword))
}

/// Singular count word for a unit spelling, if it is a count unit
pub fn count_unit_singular(unit: &str) -> Option<&'static str> {
    let unit = unit.trim().to_lowercase();
    COUNT_UNIT_WORDS
        .iter()
        .find(|(spelling, _)| *spelling == unit)
        .map(|(_, singular)| *singular)
}

/// Whether a unit spelling denotes discrete items
pub fn is_count_unit(unit: &str) -> bool {
    count_unit_singular(unit).is_some()
}

/// Preferred display unit for an ingredient, first table match wins
pub fn preferred_unit(normalized_name: &str) -> Option<DisplayUnit> {
    PREFERRED_UNITS
        .iter()
        .find(|(key, _)| normalized_name.contains(key))
        .map(|(_, unit)| unit.clone())
}
