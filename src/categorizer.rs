//! # Categorizer
//!
//! Assigns a grocery aisle to an ingredient by keyword substring match.
//! Rules are checked in a fixed order and the first match wins, so
//! "peanut butter" lands in Produce (via "pea") before Dairy gets a look.
//! Names matching nothing go to [`Category::Other`].

use crate::ingredient_model::Category;
use log::trace;

/// Category rules in evaluation order
pub const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (
        Category::Produce,
        &[
            "lettuce", "spinach", "kale", "arugula", "cabbage", "carrot", "onion", "garlic",
            "potato", "tomato", "pepper", "cucumber", "zucchini", "squash", "pumpkin", "broccoli",
            "cauliflower", "corn", "pea", "bean", "lentil", "fruit", "apple", "banana", "orange",
            "berry", "lemon", "lime", "herb", "cilantro", "parsley", "basil", "mint", "thyme",
            "rosemary", "avocado", "mushroom",
        ],
    ),
    (
        Category::Dairy,
        &["milk", "cream", "cheese", "yogurt", "butter", "egg", "margarine"],
    ),
    (
        Category::Meat,
        &[
            "beef", "steak", "chicken", "pork", "ham", "bacon", "sausage", "turkey", "meat", "lamb",
            "veal",
        ],
    ),
    (
        Category::Seafood,
        &[
            "fish", "salmon", "tuna", "shrimp", "prawn", "crab", "lobster", "clam", "mussel",
            "oyster", "scallop", "seafood",
        ],
    ),
    (
        Category::BakingAndSpices,
        &[
            "flour", "sugar", "baking powder", "baking soda", "yeast", "salt", "pepper", "spice",
            "cinnamon", "vanilla", "cocoa", "chocolate", "extract",
        ],
    ),
    (
        Category::GrainsAndPasta,
        &[
            "rice", "pasta", "noodle", "spaghetti", "macaroni", "bread", "cereal", "oat", "quinoa",
            "barley", "grain",
        ],
    ),
    (
        Category::CannedGoods,
        &["can", "canned", "jar", "preserved", "soup", "broth", "stock"],
    ),
    (Category::Frozen, &["frozen", "ice cream", "popsicle"]),
    (
        Category::CondimentsAndSauces,
        &[
            "sauce", "ketchup", "mustard", "mayo", "mayonnaise", "vinegar", "oil", "dressing",
            "syrup", "honey", "jam", "jelly",
        ],
    ),
    (
        Category::Beverages,
        &["water", "juice", "soda", "tea", "coffee", "wine", "beer", "alcohol", "drink"],
    ),
    (
        Category::Snacks,
        &["chip", "cracker", "nut", "seed", "snack", "popcorn", "pretzel"],
    ),
];

/// Category for an ingredient name
pub fn categorize(name: &str) -> Category {
    let name = name.to_lowercase();
    let category = CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| name.contains(keyword)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other);

    trace!("Categorized '{}' as {}", name, category);
    category
}
