#[cfg(test)]
mod tests {
    use grocery::engine_config::{EngineConfig, MergePolicy};
    use grocery::ingredient_model::{Category, RawIngredient, Recipe, ShoppingListItem};
    use grocery::shopping_list::{generate_shopping_list, render_text, ShoppingListGenerator};

    fn text_recipe(id: &str, lines: &[&str]) -> Recipe {
        lines
            .iter()
            .fold(Recipe::new(id), |recipe, line| recipe.with_ingredient(RawIngredient::text(line)))
    }

    fn find<'a>(items: &'a [ShoppingListItem], name: &str) -> &'a ShoppingListItem {
        items
            .iter()
            .find(|item| item.name == name)
            .unwrap_or_else(|| panic!("no item named {}: {:#?}", name, items))
    }

    #[test]
    fn test_empty_input() {
        assert!(generate_shopping_list(&[]).is_empty());

        let list = ShoppingListGenerator::new().build(&[]);
        assert!(list.is_empty());
        assert_eq!(list.total_count, 0);
    }

    #[test]
    fn test_recipes_without_ingredients() {
        let recipes = vec![Recipe::new("empty"), Recipe::new("also-empty")];
        assert!(generate_shopping_list(&recipes).is_empty());
    }

    #[test]
    fn test_aggregation_additivity() {
        let recipes = vec![
            text_recipe("bread", &["1 cup flour"]),
            text_recipe("cake", &["2 cups flour"]),
        ];

        let items = generate_shopping_list(&recipes);
        assert_eq!(items.len(), 1);

        let flour = &items[0];
        assert_eq!(flour.category, Category::BakingAndSpices);
        assert_eq!(flour.unit, "cup");
        assert!((flour.amount - 3.0).abs() < 1e-6);
        assert_eq!(flour.formatted_amount, "3");
        assert_eq!(flour.display_text, "3 cup Flour");
        assert_eq!(flour.recipe_ids, vec!["bread", "cake"]);
    }

    #[test]
    fn test_round_trip_through_grams() {
        for cups in [0.25, 0.75, 1.5, 4.0] {
            let recipe = Recipe::new("r").with_ingredient(RawIngredient::structured("sugar", cups, "cup"));
            let items = generate_shopping_list(&[recipe]);

            assert_eq!(items[0].unit, "cup");
            assert!(items[0].standardized_display.contains(" g "));
            assert!(
                (items[0].amount - cups).abs() / cups < 0.01,
                "{} cups came back as {}",
                cups,
                items[0].amount
            );
        }
    }

    #[test]
    fn test_count_detection() {
        let recipe = Recipe::new("omelette").with_ingredient(RawIngredient::structured("eggs", 2.0, ""));

        let items = generate_shopping_list(&[recipe]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].unit, "count");
        assert_eq!(items[0].amount, 2.0);
        assert!(items[0].display_text.contains('2'));
        assert!(items[0].display_text.contains("Eggs"));
        assert_eq!(items[0].category, Category::Dairy);
    }

    #[test]
    fn test_fraction_formatting() {
        let recipe = Recipe::new("r").with_ingredient(RawIngredient::structured("salt", 0.5, "teaspoon"));

        let items = generate_shopping_list(&[recipe]);
        assert_eq!(items[0].formatted_amount, "1/2");
        assert!(items[0].display_text.contains("tsp"));
    }

    #[test]
    fn test_determinism() {
        let recipes = vec![
            text_recipe(
                "stew",
                &["1 lb beef", "2 carrots", "1 cup beef broth", "2 cloves garlic", "1 tsp salt"],
            ),
            text_recipe(
                "salad",
                &["1 head lettuce", "2 tbsp olive oil", "1 tbsp vinegar", "1/2 cup walnuts"],
            ),
        ];

        let first = generate_shopping_list(&recipes);
        let second = generate_shopping_list(&recipes);
        assert_eq!(first.len(), second.len());

        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.category, b.category);
            assert_eq!(a.display_text, b.display_text);
        }

        let labels: Vec<_> = first.iter().map(|item| item.category.label()).collect();
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(labels, sorted);
    }

    #[test]
    fn test_no_silent_loss() {
        let recipes = vec![
            Recipe::new("r1").with_ingredient(RawIngredient::structured("cocoa powder", 2.0, "tbsp")),
            Recipe::new("r2").with_ingredient(RawIngredient::structured("cocoa powder", 20.0, "g")),
        ];

        let items = generate_shopping_list(&recipes);
        assert_eq!(items.len(), 2);

        let mut units: Vec<_> = items.iter().map(|item| item.unit.as_str()).collect();
        units.sort();
        assert_eq!(units, vec!["g", "tablespoon"]);

        let grams = items.iter().find(|item| item.unit == "g").unwrap();
        assert_eq!(grams.formatted_amount, "20");
        assert_eq!(grams.recipe_ids, vec!["r2"]);
    }

    #[test]
    fn test_density_reconciles_units() {
        let recipes = vec![
            Recipe::new("r1").with_ingredient(RawIngredient::structured("whole milk", 1.0, "cup")),
            Recipe::new("r2").with_ingredient(RawIngredient::structured("whole milk", 100.0, "g")),
        ];

        let items = generate_shopping_list(&recipes);
        assert_eq!(items.len(), 1);
        assert!(items[0].standardized_display.ends_with(" g Milk"));
    }

    #[test]
    fn test_force_merge_combines_lines() {
        let recipes = vec![
            Recipe::new("r1").with_ingredient(RawIngredient::structured("cocoa powder", 2.0, "tbsp")),
            Recipe::new("r2").with_ingredient(RawIngredient::structured("cocoa powder", 20.0, "g")),
        ];

        let config = EngineConfig::default().with_merge_policy(MergePolicy::ForceMerge);
        let items = ShoppingListGenerator::with_config(config).generate(&recipes);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].recipe_ids, vec!["r1", "r2"]);
    }

    #[test]
    fn test_count_units_from_text() {
        let recipes = vec![
            text_recipe("soup", &["2 cloves garlic, minced", "3 stalks celery"]),
            text_recipe("stir fry", &["1 clove garlic"]),
        ];

        let items = generate_shopping_list(&recipes);
        assert_eq!(find(&items, "Garlic").display_text, "3 Cloves of Garlic");
        assert_eq!(find(&items, "Celery").display_text, "3 Stalks of Celery");
    }

    #[test]
    fn test_unknown_unit_passes_through() {
        let recipe = text_recipe("r", &["2 pinches saffron"]);

        let items = generate_shopping_list(&[recipe]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].unit, "pinches");
        assert_eq!(items[0].display_text, "2 pinches Saffron");
    }

    #[test]
    fn test_tiny_amount_stays_visible() {
        let recipe = Recipe::new("r").with_ingredient(RawIngredient::structured("milk", 1.0, "ml"));

        let items = generate_shopping_list(&[recipe]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].unit, "ml");
        assert_eq!(items[0].formatted_amount, "1");
        assert_eq!(items[0].display_text, "1 ml Milk");
    }

    #[test]
    fn test_can_size_in_brackets_merges() {
        let recipes = vec![
            text_recipe("chili", &["1 can diced tomatoes"]),
            text_recipe("soup", &["1 (14 oz) can diced tomatoes"]),
        ];

        let items = generate_shopping_list(&recipes);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].formatted_amount, "2");
        assert_eq!(items[0].display_text, "2 Cans of Tomatoes");
        assert_eq!(items[0].recipe_ids, vec!["chili", "soup"]);
    }

    #[test]
    fn test_ids_are_unique() {
        let recipe = text_recipe(
            "r",
            &["1 cup flour", "2 eggs", "1 cup milk", "1 tsp salt", "2 tbsp butter", "1 onion"],
        );

        let items = generate_shopping_list(&[recipe]);
        let mut ids: Vec<_> = items.iter().map(|item| item.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn test_shopping_list_envelope() {
        let recipe = text_recipe("r", &["1 cup flour", "2 eggs", "1 cup milk"]);

        let list = ShoppingListGenerator::new().build(&[recipe]);
        assert_eq!(list.total_count, 3);
        assert_eq!(list.checked_count, 0);
        assert_eq!(list.category_count(Category::Dairy), 2);

        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["totalCount"], 3);
        assert_eq!(json["shoppingList"][0]["category"], "Baking & Spices");

        let text = render_text(&list);
        assert!(text.starts_with("Baking & Spices (1)\n"));
        assert!(text.contains("Dairy (2)"));
    }
}
