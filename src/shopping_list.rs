//! # Shopping List Generation
//!
//! This module ties the pipeline together: every ingredient of every recipe
//! is parsed, cleaned, standardized and aggregated, and each resulting bucket
//! becomes one categorized, human readable [`ShoppingListItem`].
//!
//! ## Features
//!
//! - Free text and structured ingredient entries
//! - Cross-recipe consolidation in milliliters, grams or counts
//! - Optional scaling of every recipe to a target number of servings
//! - Stable ordering by category, then name
//! - Plain text rendering grouped by category
//!
//! ## Usage
//!
//! ```rust
//! use grocery::ingredient_model::{RawIngredient, Recipe};
//! use grocery::shopping_list::generate_shopping_list;
//!
//! let recipes = vec![
//!     Recipe::new("bread").with_ingredient(RawIngredient::text("1 cup flour")),
//!     Recipe::new("cake").with_ingredient(RawIngredient::text("2 cups flour")),
//! ];
//!
//! let items = generate_shopping_list(&recipes);
//! assert_eq!(items.len(), 1);
//! assert_eq!(items[0].formatted_amount, "3");
//! assert_eq!(items[0].unit, "cup");
//! ```

use crate::aggregator::{AggregatedBucket, Aggregator};
use crate::categorizer::categorize;
use crate::display_formatter::present;
use crate::engine_config::EngineConfig;
use crate::ingredient_model::{
    Category, RawIngredient, Recipe, ShoppingList, ShoppingListItem, StandardizedIngredient,
};
use crate::ingredient_parser::parse_raw_ingredient;
use crate::name_cleaner::clean_ingredient_name;
use crate::reference_tables::is_liquid;
use crate::unit_converter::convert_to_standard;
use crate::unit_normalizer::normalize_unit;
use log::{debug, info, warn};
use rand::Rng;
use std::collections::HashSet;
use std::fmt::Write;

/// Consolidates recipes into a shopping list
#[derive(Debug, Clone, Default)]
pub struct ShoppingListGenerator {
    config: EngineConfig,
}

impl ShoppingListGenerator {
    /// Create a generator with the default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create a generator with a custom configuration
    pub fn with_config(config: EngineConfig) -> Self {
        debug!(
            "Creating ShoppingListGenerator: merge_policy={:?}, target_servings={:?}",
            config.merge_policy, config.target_servings
        );
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse, clean and standardize every ingredient of every recipe
    ///
    /// Entries without a usable name or with a non-positive amount are skipped.
    pub fn standardize(&self, recipes: &[Recipe]) -> Vec<StandardizedIngredient> {
        let mut standardized = Vec::new();

        for (index, recipe) in recipes.iter().enumerate() {
            let recipe_id = recipe.identifier(index);
            if recipe.ingredients.is_empty() {
                match recipe.title.as_deref() {
                    Some(title) => {
                        warn!("No ingredients found for recipe {} ('{}')", recipe_id, title)
                    }
                    None => warn!("No ingredients found for recipe {}", recipe_id),
                }
                continue;
            }

            let scale = self.scale_for(recipe);
            for raw in &recipe.ingredients {
                if let Some(ingredient) = self.standardize_ingredient(raw, &recipe_id, scale) {
                    standardized.push(ingredient);
                }
            }
        }

        standardized
    }

    /// Aggregate standardized ingredients into buckets
    pub fn aggregate(&self, recipes: &[Recipe]) -> Vec<AggregatedBucket> {
        let mut aggregator = Aggregator::new(self.config.merge_policy);
        aggregator.extend(self.standardize(recipes));
        aggregator.into_buckets()
    }

    /// Generate the consolidated shopping list items
    ///
    /// # Arguments
    ///
    /// * `recipes` - Recipes to consolidate, in any order
    ///
    /// # Returns
    ///
    /// Items sorted by category label, then by name. Empty input yields an empty list.
    pub fn generate(&self, recipes: &[Recipe]) -> Vec<ShoppingListItem> {
        if recipes.is_empty() {
            warn!("No recipes provided for shopping list generation");
            return Vec::new();
        }

        let buckets = self.aggregate(recipes);
        let mut ids = HashSet::with_capacity(buckets.len());
        let mut items: Vec<ShoppingListItem> = buckets
            .iter()
            .map(|bucket| self.to_item(bucket, unique_item_id(&mut ids)))
            .collect();

        items.sort_by(|a, b| {
            a.category
                .label()
                .cmp(b.category.label())
                .then_with(|| a.name.cmp(&b.name))
        });

        info!(
            "Generated {} shopping list items from {} recipes",
            items.len(),
            recipes.len()
        );
        items
    }

    /// Generate the items and wrap them with per-category statistics
    pub fn build(&self, recipes: &[Recipe]) -> ShoppingList {
        ShoppingList::from_items(self.generate(recipes))
    }

    fn scale_for(&self, recipe: &Recipe) -> f64 {
        match self.config.target_servings {
            Some(target) => target / recipe.effective_servings(),
            None => 1.0,
        }
    }

    fn standardize_ingredient(
        &self,
        raw: &RawIngredient,
        recipe_id: &str,
        scale: f64,
    ) -> Option<StandardizedIngredient> {
        let parsed = parse_raw_ingredient(raw);
        if parsed.name.trim().is_empty() {
            debug!("Skipping ingredient without a name in recipe {}", recipe_id);
            return None;
        }

        let amount = parsed.amount * scale;
        if !amount.is_finite() || amount <= 0.0 {
            debug!(
                "Skipping '{}' in recipe {}: amount {} is not positive",
                parsed.name, recipe_id, amount
            );
            return None;
        }

        let name = truncate_name(&parsed.name, self.config.max_name_length);
        let cleaned = clean_ingredient_name(&name);
        let unit = normalize_unit(&parsed.unit, &cleaned.key);
        let (std_quantity, std_unit) = convert_to_standard(amount, &unit, &cleaned.key);

        Some(StandardizedIngredient {
            is_liquid: is_liquid(&cleaned.key),
            normalized_name: cleaned.key,
            clean_name: cleaned.display,
            std_quantity,
            std_unit,
            original_unit: parsed.unit,
            source_recipe_id: recipe_id.to_string(),
        })
    }

    fn to_item(&self, bucket: &AggregatedBucket, id: String) -> ShoppingListItem {
        let presentation = present(bucket, self.config.fraction_tolerance);

        ShoppingListItem {
            id,
            name: bucket.clean_name.clone(),
            amount: presentation.amount,
            formatted_amount: presentation.formatted_amount,
            unit: presentation.unit.token().to_string(),
            display_text: presentation.display_text,
            category: categorize(&bucket.normalized_name),
            checked: false,
            standardized_display: presentation.standardized_display,
            recipe_ids: bucket.recipe_ids.iter().cloned().collect(),
        }
    }
}

/// Generate a shopping list with the default configuration
pub fn generate_shopping_list(recipes: &[Recipe]) -> Vec<ShoppingListItem> {
    ShoppingListGenerator::new().generate(recipes)
}

/// Render a shopping list as plain text, grouped by category
///
/// ```text
/// Baking & Spices (2)
/// - 3 cup All-purpose Flour
/// - [x] 1/2 tsp Salt
/// ```
pub fn render_text(list: &ShoppingList) -> String {
    let mut output = String::new();
    let mut current: Option<Category> = None;

    for item in &list.items {
        if current != Some(item.category) {
            if current.is_some() {
                output.push('\n');
            }
            let _ = writeln!(
                output,
                "{} ({})",
                item.category,
                list.category_count(item.category)
            );
            current = Some(item.category);
        }

        let marker = if item.checked { "[x] " } else { "" };
        let _ = writeln!(output, "- {}{}", marker, item.display_text);
    }

    output
}

/// Shorten a name to at most `max_length` characters, cutting at a word boundary
fn truncate_name(name: &str, max_length: usize) -> String {
    if name.chars().count() <= max_length {
        return name.to_string();
    }

    let cut: String = name.chars().take(max_length).collect();
    let truncated = match cut.rfind(char::is_whitespace) {
        Some(boundary) if boundary > 0 => cut[..boundary].trim_end().to_string(),
        _ => cut,
    };

    warn!(
        "Ingredient name longer than {} characters truncated to '{}'",
        max_length, truncated
    );
    truncated
}

/// Random 8 hex digit id not yet present in `taken`
fn unique_item_id(taken: &mut HashSet<String>) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let id = format!("{:08x}", rng.gen::<u32>());
        if taken.insert(id.clone()) {
            return id;
        }
    }
}
