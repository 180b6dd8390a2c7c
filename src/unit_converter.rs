//! # Unit Converter
//!
//! Converts quantities into one of three standard units (milliliters, grams
//! or count) so that contributions from different recipes can be added, and
//! back into display units afterwards.
//!
//! Solids measured by volume ("1 cup flour") are turned into grams through
//! the density table. Without a density entry the amount stays in
//! milliliters. Unknown units are carried through unchanged.

use crate::ingredient_model::{DisplayUnit, StdUnit, Unit, UnitSystem};
use crate::reference_tables::{density_for, grams_per_unit, is_liquid, ml_per_unit};
use log::{trace, warn};

/// Convert a quantity to its standard unit
///
/// # Arguments
///
/// * `quantity` - Amount in `unit`
/// * `unit` - Canonical unit from the normalizer
/// * `normalized_name` - Ingredient key, used for the liquid heuristic and densities
///
/// # Returns
///
/// The quantity and its standard unit. Unknown units come back as
/// `StdUnit::Unconverted` with the quantity untouched.
pub fn convert_to_standard(quantity: f64, unit: &Unit, normalized_name: &str) -> (f64, StdUnit) {
    let converted = match unit.system() {
        Some(UnitSystem::Count) => Some((quantity, StdUnit::Count)),
        Some(UnitSystem::Volume) => ml_per_unit(unit).map(|factor| {
            let ml = quantity * factor;
            if is_liquid(normalized_name) {
                return (ml, StdUnit::Milliliters);
            }
            match density_for(normalized_name) {
                Some(density) => (ml * density, StdUnit::Grams),
                None => (ml, StdUnit::Milliliters),
            }
        }),
        Some(UnitSystem::Mass) => {
            grams_per_unit(unit).map(|factor| (quantity * factor, StdUnit::Grams))
        }
        None => None,
    };

    match converted {
        Some((std_quantity, std_unit)) => {
            trace!(
                "Standardized {} {} of '{}' -> {} {}",
                quantity,
                unit,
                normalized_name,
                std_quantity,
                std_unit
            );
            (std_quantity, std_unit)
        }
        None => {
            warn!(
                "Could not standardize unit '{}' for '{}', keeping it as is",
                unit, normalized_name
            );
            (quantity, StdUnit::Unconverted(unit.abbreviation().to_string()))
        }
    }
}

/// Convert a standardized quantity into a display unit
///
/// Crossing between volume and mass uses the density table.
///
/// # Returns
///
/// `None` when the display unit cannot express the quantity (count to volume,
/// grams to cups without a density, ...)
pub fn convert_from_standard(
    quantity: f64,
    std_unit: &StdUnit,
    target: &DisplayUnit,
    normalized_name: &str,
) -> Option<f64> {
    match (std_unit, target) {
        (StdUnit::Count, DisplayUnit::Count) => Some(quantity),
        (StdUnit::Unconverted(unit), DisplayUnit::Unconverted(shown)) if unit == shown => {
            Some(quantity)
        }
        (StdUnit::Milliliters, _) => {
            let unit = target.measurement_unit()?;
            if let Some(factor) = ml_per_unit(&unit) {
                return Some(quantity / factor);
            }
            let grams = quantity * density_for(normalized_name)?;
            grams_per_unit(&unit).map(|factor| grams / factor)
        }
        (StdUnit::Grams, _) => {
            let unit = target.measurement_unit()?;
            if let Some(factor) = grams_per_unit(&unit) {
                return Some(quantity / factor);
            }
            let ml = quantity / density_for(normalized_name)?;
            ml_per_unit(&unit).map(|factor| ml / factor)
        }
        _ => None,
    }
}

/// Whether a standardized quantity can be shown in the given display unit
pub fn can_convert(std_unit: &StdUnit, target: &DisplayUnit, normalized_name: &str) -> bool {
    convert_from_standard(1.0, std_unit, target, normalized_name).is_some()
}
