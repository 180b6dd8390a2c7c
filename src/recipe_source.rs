//! # Recipe Source
//!
//! Loads recipes from JSON. Two layouts are accepted: a bare array of
//! recipes, or an object with a `recipes` array (the request body shape of
//! the shopping list endpoint).

use crate::errors::GroceryError;
use crate::ingredient_model::Recipe;
use log::{debug, info};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum RecipeDocument {
    List(Vec<Recipe>),
    Wrapped { recipes: Vec<Recipe> },
}

/// Parse recipes from a JSON string
///
/// # Returns
///
/// The recipes in input order, or `GroceryError::InvalidInput` when the JSON
/// is malformed or matches neither layout
pub fn parse_recipes(json: &str) -> Result<Vec<Recipe>, GroceryError> {
    if json.trim().is_empty() {
        return Err(GroceryError::InvalidInput("empty input".to_string()));
    }

    let value: serde_json::Value = serde_json::from_str(json)?;
    let recipes = match serde_json::from_value::<RecipeDocument>(value) {
        Ok(RecipeDocument::List(recipes)) => recipes,
        Ok(RecipeDocument::Wrapped { recipes }) => recipes,
        Err(err) => {
            debug!("Recipe document did not match a known layout: {}", err);
            return Err(GroceryError::InvalidInput(
                "expected an array of recipes or an object with a 'recipes' array".to_string(),
            ));
        }
    };

    debug!("Parsed {} recipes", recipes.len());
    Ok(recipes)
}

/// Read recipes from any reader
pub fn read_recipes<R: Read>(mut reader: R) -> Result<Vec<Recipe>, GroceryError> {
    let mut json = String::new();
    reader.read_to_string(&mut json)?;
    parse_recipes(&json)
}

/// Load recipes from a JSON file
pub fn load_recipes<P: AsRef<Path>>(path: P) -> Result<Vec<Recipe>, GroceryError> {
    let path = path.as_ref();
    info!("Loading recipes from {}", path.display());
    let file = File::open(path)?;
    read_recipes(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array() {
        let recipes = parse_recipes(r#"[{"id": 1, "ingredients": ["2 eggs"]}]"#).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].identifier(0), "1");
    }

    #[test]
    fn test_wrapped_object() {
        let recipes = parse_recipes(
            r#"{"recipes": [{"id": "a", "ingredients": []}, {"id": "b", "ingredients": []}]}"#,
        )
        .unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[1].identifier(1), "b");
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(parse_recipes(""), Err(GroceryError::InvalidInput(_))));
        assert!(matches!(parse_recipes("{not json"), Err(GroceryError::InvalidInput(_))));
        assert!(matches!(parse_recipes(r#"{"dishes": []}"#), Err(GroceryError::InvalidInput(_))));
        assert!(matches!(parse_recipes("42"), Err(GroceryError::InvalidInput(_))));
    }

    #[test]
    fn test_read_from_reader() {
        let input = br#"[{"id": 7, "extendedIngredients": [{"name": "milk", "amount": 1, "unit": "cup"}]}]"#;
        let recipes = read_recipes(&input[..]).unwrap();
        assert_eq!(recipes[0].ingredients.len(), 1);
    }
}
