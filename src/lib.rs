//! # Grocery
//!
//! A shopping list consolidation engine. It takes recipes with free text or
//! structured ingredient lists and produces one deduplicated, unit-normalized,
//! categorized shopping list.
//!
//! The pipeline runs parse, clean, standardize, aggregate, then display and
//! categorize. See [`shopping_list::ShoppingListGenerator`] for the entry point.

pub mod aggregator;
pub mod categorizer;
pub mod display_formatter;
pub mod engine_config;
pub mod errors;
pub mod ingredient_model;
pub mod ingredient_parser;
pub mod logging;
pub mod measurement_patterns;
pub mod name_cleaner;
pub mod recipe_source;
pub mod reference_tables;
pub mod shopping_list;
pub mod unit_converter;
pub mod unit_normalizer;

pub use engine_config::{EngineConfig, MergePolicy};
pub use errors::GroceryError;
pub use ingredient_model::{Category, RawIngredient, Recipe, ShoppingList, ShoppingListItem};
pub use shopping_list::{generate_shopping_list, render_text, ShoppingListGenerator};
