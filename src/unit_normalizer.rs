//! # Unit Normalizer
//!
//! Maps the many ways recipes spell units ("Tbsp.", "tablespoons", "tbs") onto
//! one canonical [`Unit`], and classifies it into a [`UnitSystem`].
//!
//! Count words (whole, piece, can, slice, stalk, clove, bunch, sprig, leaf,
//! ear, head, loaf and their plurals) always classify as Count, even for
//! ingredients whose name looks like a liquid ("1 can coconut milk").
//! Ounces are read as fluid ounces for liquids and as weight otherwise.

use crate::ingredient_model::{Unit, UnitSystem};
use crate::reference_tables::{count_unit_singular, is_liquid};
use log::trace;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Unit spellings and their canonical unit
static UNIT_MAPPINGS: LazyLock<HashMap<&'static str, Unit>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Volume units
    map.insert("tsp", Unit::Teaspoon);
    map.insert("tsps", Unit::Teaspoon);
    map.insert("teaspoon", Unit::Teaspoon);
    map.insert("teaspoons", Unit::Teaspoon);
    map.insert("tbsp", Unit::Tablespoon);
    map.insert("tbsps", Unit::Tablespoon);
    map.insert("tbs", Unit::Tablespoon);
    map.insert("tablespoon", Unit::Tablespoon);
    map.insert("tablespoons", Unit::Tablespoon);
    map.insert("fl oz", Unit::FluidOunce);
    map.insert("floz", Unit::FluidOunce);
    map.insert("fluid ounce", Unit::FluidOunce);
    map.insert("fluid ounces", Unit::FluidOunce);
    map.insert("cup", Unit::Cup);
    map.insert("cups", Unit::Cup);
    map.insert("c", Unit::Cup);
    map.insert("pint", Unit::Pint);
    map.insert("pints", Unit::Pint);
    map.insert("pt", Unit::Pint);
    map.insert("quart", Unit::Quart);
    map.insert("quarts", Unit::Quart);
    map.insert("qt", Unit::Quart);
    map.insert("gallon", Unit::Gallon);
    map.insert("gallons", Unit::Gallon);
    map.insert("gal", Unit::Gallon);
    map.insert("ml", Unit::Milliliter);
    map.insert("milliliter", Unit::Milliliter);
    map.insert("milliliters", Unit::Milliliter);
    map.insert("millilitre", Unit::Milliliter);
    map.insert("millilitres", Unit::Milliliter);
    map.insert("l", Unit::Liter);
    map.insert("liter", Unit::Liter);
    map.insert("liters", Unit::Liter);
    map.insert("litre", Unit::Liter);
    map.insert("litres", Unit::Liter);

    // Weight units
    map.insert("g", Unit::Gram);
    map.insert("gram", Unit::Gram);
    map.insert("grams", Unit::Gram);
    map.insert("kg", Unit::Kilogram);
    map.insert("kilogram", Unit::Kilogram);
    map.insert("kilograms", Unit::Kilogram);
    map.insert("oz", Unit::Ounce);
    map.insert("ounce", Unit::Ounce);
    map.insert("ounces", Unit::Ounce);
    map.insert("lb", Unit::Pound);
    map.insert("lbs", Unit::Pound);
    map.insert("pound", Unit::Pound);
    map.insert("pounds", Unit::Pound);

    map
});

/// Canonicalize a unit spelling
///
/// # Arguments
///
/// * `unit_str` - The unit as written ("Tbsp.", "cups", "")
/// * `normalized_name` - The ingredient's normalized name, used for the ounce/fluid ounce split
///
/// # Returns
///
/// The canonical unit; `Unit::Unknown` keeps unrecognized spellings verbatim
pub fn normalize_unit(unit_str: &str, normalized_name: &str) -> Unit {
    let cleaned = unit_str.trim().trim_end_matches('.').to_lowercase();
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Some(singular) = count_unit_singular(&cleaned) {
        return Unit::Count(singular.to_string());
    }

    let unit = UNIT_MAPPINGS
        .get(cleaned.as_str())
        .or_else(|| UNIT_MAPPINGS.get(cleaned.replace('.', "").as_str()))
        .cloned()
        .unwrap_or_else(|| Unit::Unknown(cleaned.clone()));

    let unit = match unit {
        Unit::Ounce if is_liquid(normalized_name) => Unit::FluidOunce,
        other => other,
    };

    trace!("Normalized unit '{}' for '{}' -> {:?}", unit_str, normalized_name, unit);
    unit
}

/// Classify a unit spelling for an ingredient, `None` for unrecognized units
pub fn classify_unit(unit_str: &str, normalized_name: &str) -> Option<UnitSystem> {
    normalize_unit(unit_str, normalized_name).system()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spelling_variants() {
        assert_eq!(normalize_unit("Tbsp.", "butter"), Unit::Tablespoon);
        assert_eq!(normalize_unit("tablespoons", "butter"), Unit::Tablespoon);
        assert_eq!(normalize_unit("TSP", "salt"), Unit::Teaspoon);
        assert_eq!(normalize_unit("cups", "flour"), Unit::Cup);
        assert_eq!(normalize_unit("Litres", "water"), Unit::Liter);
        assert_eq!(normalize_unit("lbs", "beef"), Unit::Pound);
        assert_eq!(normalize_unit("fl. oz", "milk"), Unit::FluidOunce);
    }

    #[test]
    fn test_ounces_depend_on_liquid_heuristic() {
        assert_eq!(normalize_unit("oz", "cheddar cheese"), Unit::Ounce);
        assert_eq!(normalize_unit("oz", "orange juice"), Unit::FluidOunce);
        assert_eq!(classify_unit("ounces", "chicken broth"), Some(UnitSystem::Volume));
        assert_eq!(classify_unit("ounces", "chocolate"), Some(UnitSystem::Mass));
    }

    #[test]
    fn test_count_words_force_count() {
        assert_eq!(normalize_unit("cans", "coconut milk"), Unit::Count("can".to_string()));
        assert_eq!(classify_unit("can", "coconut milk"), Some(UnitSystem::Count));
        assert_eq!(normalize_unit("", "eggs"), Unit::Count(String::new()));
        assert_eq!(normalize_unit("Leaves", "basil"), Unit::Count("leaf".to_string()));
    }

    #[test]
    fn test_unknown_units_pass_through() {
        assert_eq!(normalize_unit("pinch", "salt"), Unit::Unknown("pinch".to_string()));
        assert_eq!(classify_unit("pinch", "salt"), None);
    }
}
