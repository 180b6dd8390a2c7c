//! # Ingredient and Shopping List Data Model
//!
//! This module defines the data structures that flow through the consolidation
//! pipeline, from the recipes handed in by a caller to the shopping list items
//! handed back.
//!
//! ## Core Concepts
//!
//! - **Recipe**: An identified set of raw ingredients, optionally with servings
//! - **RawIngredient**: Free text (`"2 cups flour"`) or a structured name/amount/unit entry
//! - **Unit**: Canonical measurement unit, tagged with its [`UnitSystem`]
//! - **StdUnit**: The standard unit used for aggregation (ml, g or count)
//! - **ShoppingListItem**: One consolidated, displayable line of the list
//!
//! ## Usage
//!
//! ```rust
//! use grocery::ingredient_model::{RawIngredient, Recipe};
//!
//! let recipe = Recipe::new("pancakes")
//!     .with_servings(4.0)
//!     .with_ingredient(RawIngredient::text("2 cups flour"))
//!     .with_ingredient(RawIngredient::structured("eggs", 2.0, ""));
//!
//! assert_eq!(recipe.ingredients.len(), 2);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A recipe as supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe identifier (numeric or textual)
    #[serde(default)]
    pub id: Option<RecipeId>,

    /// Optional recipe title, only used for diagnostics
    #[serde(default)]
    pub title: Option<String>,

    /// Number of servings the ingredient quantities are written for
    #[serde(default)]
    pub servings: Option<f64>,

    /// Raw ingredient entries (`extendedIngredients` is accepted as well)
    #[serde(
        default,
        alias = "extendedIngredients",
        deserialize_with = "null_as_empty"
    )]
    pub ingredients: Vec<RawIngredient>,
}

/// Recipe identifiers arrive as JSON numbers or strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    Number(serde_json::Number),
    Text(String),
}

/// An ingredient entry exactly as the recipe provides it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawIngredient {
    /// Free text such as `"1 1/2 cups all-purpose flour"`
    Text(String),
    /// Name, amount and unit supplied separately
    Structured(StructuredIngredient),
}

/// Structured ingredient entry, as returned by recipe APIs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredIngredient {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: Option<AmountValue>,
    #[serde(default)]
    pub unit: Option<String>,
    /// Original free-text line, used when `name` is missing
    #[serde(default)]
    pub original: Option<String>,
}

/// Amounts are numbers most of the time, but some sources send text ("1/2")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountValue {
    Number(f64),
    Text(String),
}

/// Result of the quantity parser
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedIngredient {
    /// Ingredient name, still raw (cleaning happens later)
    pub name: String,
    /// Parsed amount; 1 when the amount could not be read
    pub amount: f64,
    /// Unit token as written, possibly empty
    pub unit: String,
}

/// Canonical measurement units
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Unit {
    // Volume units
    Teaspoon,
    Tablespoon,
    FluidOunce,
    Cup,
    Pint,
    Quart,
    Gallon,
    Milliliter,
    Liter,

    // Weight units
    Gram,
    Kilogram,
    Ounce,
    Pound,

    /// Discrete items. Holds the singular count word ("clove", "can"), empty for a bare count
    Count(String),

    /// Unrecognized unit, kept verbatim
    Unknown(String),
}

/// The measurement system a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Volume,
    Mass,
    Count,
}

/// Standard unit used for aggregation across recipes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StdUnit {
    Milliliters,
    Grams,
    Count,
    /// The original unit could not be standardized and is carried through unchanged
    Unconverted(String),
}

/// Unit chosen for presenting a consolidated quantity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DisplayUnit {
    Count,
    Teaspoon,
    Tablespoon,
    Cup,
    Milliliter,
    Liter,
    Gram,
    Kilogram,
    /// Unit that was never standardized, shown as written
    Unconverted(String),
}

/// A parsed, cleaned and standardized ingredient contribution from one recipe
#[derive(Debug, Clone, PartialEq)]
pub struct StandardizedIngredient {
    /// Lowercase grouping key
    pub normalized_name: String,
    /// Title-cased display name
    pub clean_name: String,
    /// Quantity expressed in `std_unit`; always > 0
    pub std_quantity: f64,
    pub std_unit: StdUnit,
    /// Unit token as it appeared in the recipe
    pub original_unit: String,
    pub is_liquid: bool,
    pub source_recipe_id: String,
}

/// Grocery aisle categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Produce,
    Dairy,
    Meat,
    Seafood,
    #[serde(rename = "Baking & Spices")]
    BakingAndSpices,
    #[serde(rename = "Grains & Pasta")]
    GrainsAndPasta,
    #[serde(rename = "Canned Goods")]
    CannedGoods,
    Frozen,
    #[serde(rename = "Condiments & Sauces")]
    CondimentsAndSauces,
    Beverages,
    Snacks,
    Other,
}

/// One consolidated line of the shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    /// Opaque token, unique within one generated list
    pub id: String,
    pub name: String,
    /// Quantity in the display unit
    pub amount: f64,
    pub formatted_amount: String,
    /// Display unit token ("cup", "teaspoon", "count", ...)
    pub unit: String,
    pub display_text: String,
    pub category: Category,
    pub checked: bool,
    /// Quantity in the standard unit, for diagnostics
    #[serde(rename = "standardizedDisplay")]
    pub standardized_display: String,
    /// Recipes that contributed to this line
    #[serde(default)]
    pub recipe_ids: Vec<String>,
}

/// A generated shopping list with per-category statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    #[serde(rename = "shoppingList")]
    pub items: Vec<ShoppingListItem>,
    /// Number of items per category label
    pub categories: BTreeMap<String, usize>,
    #[serde(rename = "totalCount")]
    pub total_count: usize,
    #[serde(rename = "checkedCount")]
    pub checked_count: usize,
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<RawIngredient>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RawIngredient>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Recipe {
    /// Create a new recipe with a textual id and no ingredients
    pub fn new(id: &str) -> Self {
        Self {
            id: Some(RecipeId::Text(id.to_string())),
            title: None,
            servings: None,
            ingredients: Vec::new(),
        }
    }

    /// Set the recipe title
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the number of servings
    pub fn with_servings(mut self, servings: f64) -> Self {
        self.servings = Some(servings);
        self
    }

    /// Add an ingredient entry
    pub fn with_ingredient(mut self, ingredient: RawIngredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Identifier used for bucket bookkeeping, falling back to the 1-based input position
    pub fn identifier(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => format!("recipe-{}", index + 1),
        }
    }

    /// Servings, with missing or non-positive values treated as 1
    pub fn effective_servings(&self) -> f64 {
        match self.servings {
            Some(servings) if servings > 0.0 => servings,
            _ => 1.0,
        }
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeId::Number(n) => write!(f, "{}", n),
            RecipeId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl RawIngredient {
    /// Free-text ingredient line
    pub fn text(line: &str) -> Self {
        RawIngredient::Text(line.to_string())
    }

    /// Structured ingredient with a numeric amount
    pub fn structured(name: &str, amount: f64, unit: &str) -> Self {
        RawIngredient::Structured(StructuredIngredient {
            name: name.to_string(),
            amount: Some(AmountValue::Number(amount)),
            unit: Some(unit.to_string()),
            original: None,
        })
    }
}

impl Unit {
    /// Short canonical spelling of the unit
    pub fn abbreviation(&self) -> &str {
        match self {
            Unit::Teaspoon => "tsp",
            Unit::Tablespoon => "tbsp",
            Unit::FluidOunce => "fl oz",
            Unit::Cup => "cup",
            Unit::Pint => "pint",
            Unit::Quart => "quart",
            Unit::Gallon => "gallon",
            Unit::Milliliter => "ml",
            Unit::Liter => "liter",
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Ounce => "oz",
            Unit::Pound => "lb",
            Unit::Count(word) => word,
            Unit::Unknown(raw) => raw,
        }
    }

    /// The unit system, or `None` for an unrecognized unit
    pub fn system(&self) -> Option<UnitSystem> {
        match self {
            Unit::Teaspoon
            | Unit::Tablespoon
            | Unit::FluidOunce
            | Unit::Cup
            | Unit::Pint
            | Unit::Quart
            | Unit::Gallon
            | Unit::Milliliter
            | Unit::Liter => Some(UnitSystem::Volume),
            Unit::Gram | Unit::Kilogram | Unit::Ounce | Unit::Pound => Some(UnitSystem::Mass),
            Unit::Count(_) => Some(UnitSystem::Count),
            Unit::Unknown(_) => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl StdUnit {
    /// Token used in keys and diagnostic strings
    pub fn as_str(&self) -> &str {
        match self {
            StdUnit::Milliliters => "ml",
            StdUnit::Grams => "g",
            StdUnit::Count => "count",
            StdUnit::Unconverted(unit) => unit,
        }
    }
}

impl DisplayUnit {
    /// Token exposed in the `unit` field of a shopping list item
    pub fn token(&self) -> &str {
        match self {
            DisplayUnit::Count => "count",
            DisplayUnit::Teaspoon => "teaspoon",
            DisplayUnit::Tablespoon => "tablespoon",
            DisplayUnit::Cup => "cup",
            DisplayUnit::Milliliter => "ml",
            DisplayUnit::Liter => "liter",
            DisplayUnit::Gram => "g",
            DisplayUnit::Kilogram => "kg",
            DisplayUnit::Unconverted(unit) => unit,
        }
    }

    /// Abbreviation used inside display text; empty for counts
    pub fn abbreviation(&self) -> &str {
        match self {
            DisplayUnit::Count => "",
            DisplayUnit::Teaspoon => "tsp",
            DisplayUnit::Tablespoon => "tbsp",
            DisplayUnit::Unconverted(unit) => unit,
            other => other.token(),
        }
    }

    /// The measurement unit behind this display unit, for table lookups
    pub fn measurement_unit(&self) -> Option<Unit> {
        match self {
            DisplayUnit::Teaspoon => Some(Unit::Teaspoon),
            DisplayUnit::Tablespoon => Some(Unit::Tablespoon),
            DisplayUnit::Cup => Some(Unit::Cup),
            DisplayUnit::Milliliter => Some(Unit::Milliliter),
            DisplayUnit::Liter => Some(Unit::Liter),
            DisplayUnit::Gram => Some(Unit::Gram),
            DisplayUnit::Kilogram => Some(Unit::Kilogram),
            DisplayUnit::Count | DisplayUnit::Unconverted(_) => None,
        }
    }
}

impl fmt::Display for StdUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Category {
    /// Human readable label, also used for sorting
    pub fn label(&self) -> &'static str {
        match self {
            Category::Produce => "Produce",
            Category::Dairy => "Dairy",
            Category::Meat => "Meat",
            Category::Seafood => "Seafood",
            Category::BakingAndSpices => "Baking & Spices",
            Category::GrainsAndPasta => "Grains & Pasta",
            Category::CannedGoods => "Canned Goods",
            Category::Frozen => "Frozen",
            Category::CondimentsAndSauces => "Condiments & Sauces",
            Category::Beverages => "Beverages",
            Category::Snacks => "Snacks",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl ShoppingList {
    /// Wrap items and compute the per-category statistics
    pub fn from_items(items: Vec<ShoppingListItem>) -> Self {
        let mut categories = BTreeMap::new();
        for item in &items {
            *categories.entry(item.category.label().to_string()).or_insert(0) += 1;
        }

        Self {
            total_count: items.len(),
            checked_count: items.iter().filter(|item| item.checked).count(),
            categories,
            items,
            generated_at: Utc::now(),
        }
    }

    /// Number of items in a category
    pub fn category_count(&self, category: Category) -> usize {
        self.categories.get(category.label()).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
