//! # Aggregator
//!
//! Sums standardized contributions per normalized ingredient name.
//!
//! Contributions in the same standard unit are simply added. A milliliter
//! bucket meeting a gram contribution (or the reverse) is reconciled through
//! the density table. Anything that still cannot be added lands in a separate
//! bucket keyed `"{name} (in {unit})"`, so no quantity is ever dropped.
//!
//! Buckets keep their insertion order, which keeps the generated list
//! deterministic for a given input.

use crate::engine_config::MergePolicy;
use crate::ingredient_model::{StandardizedIngredient, StdUnit};
use crate::reference_tables::density_for;
use log::{debug, trace};
use std::collections::{BTreeSet, HashMap};

/// Accumulated quantity for one ingredient in one standard unit
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedBucket {
    /// Bucket key; the normalized name, or `"{name} (in {unit})"` for a disambiguated bucket
    pub key: String,
    /// Normalized ingredient name, used for table lookups
    pub normalized_name: String,
    /// Display name of the first contribution
    pub clean_name: String,
    pub std_quantity: f64,
    pub std_unit: StdUnit,
    /// Unit token of the first contribution
    pub original_unit: String,
    pub is_liquid: bool,
    /// Contributing recipe ids, sorted
    pub recipe_ids: BTreeSet<String>,
}

impl AggregatedBucket {
    fn open(key: String, ingredient: StandardizedIngredient) -> Self {
        let mut recipe_ids = BTreeSet::new();
        recipe_ids.insert(ingredient.source_recipe_id);
        Self {
            key,
            normalized_name: ingredient.normalized_name,
            clean_name: ingredient.clean_name,
            std_quantity: ingredient.std_quantity,
            std_unit: ingredient.std_unit,
            original_unit: ingredient.original_unit,
            is_liquid: ingredient.is_liquid,
            recipe_ids,
        }
    }

    fn absorb(&mut self, quantity: f64, recipe_id: String) {
        self.std_quantity += quantity;
        self.recipe_ids.insert(recipe_id);
    }

    /// Whether this bucket holds a contribution that could not be merged with its name's main bucket
    pub fn is_disambiguated(&self) -> bool {
        self.key != self.normalized_name
    }
}

/// Groups standardized ingredients into buckets
#[derive(Debug, Default)]
pub struct Aggregator {
    policy: MergePolicy,
    buckets: Vec<AggregatedBucket>,
    index: HashMap<String, usize>,
}

impl Aggregator {
    pub fn new(policy: MergePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Add one contribution
    pub fn add(&mut self, ingredient: StandardizedIngredient) {
        let key = ingredient.normalized_name.clone();

        let Some(&position) = self.index.get(&key) else {
            trace!(
                "New bucket '{}': {} {}",
                key,
                ingredient.std_quantity,
                ingredient.std_unit
            );
            self.open_bucket(key, ingredient);
            return;
        };

        let policy = self.policy;
        let bucket = &mut self.buckets[position];

        if bucket.std_unit == ingredient.std_unit {
            bucket.absorb(ingredient.std_quantity, ingredient.source_recipe_id);
            return;
        }

        let density = density_for(&key).or(match policy {
            MergePolicy::ForceMerge => Some(1.0),
            MergePolicy::Disambiguate => None,
        });

        let bucket_in_ml = bucket.std_unit == StdUnit::Milliliters;
        let bucket_in_g = bucket.std_unit == StdUnit::Grams;
        let adding_g = ingredient.std_unit == StdUnit::Grams;
        let adding_ml = ingredient.std_unit == StdUnit::Milliliters;

        match density {
            Some(density) if bucket_in_ml && adding_g => {
                debug!(
                    "Converting bucket '{}' from ml to g at {} g/ml",
                    key, density
                );
                bucket.std_quantity *= density;
                bucket.std_unit = StdUnit::Grams;
                bucket.absorb(ingredient.std_quantity, ingredient.source_recipe_id);
            }
            Some(density) if bucket_in_g && adding_ml => {
                debug!(
                    "Converting contribution to '{}' from ml to g at {} g/ml",
                    key, density
                );
                bucket.absorb(ingredient.std_quantity * density, ingredient.source_recipe_id);
            }
            _ => self.disambiguate(ingredient),
        }
    }

    /// Add every contribution from an iterator
    pub fn extend<I>(&mut self, ingredients: I)
    where
        I: IntoIterator<Item = StandardizedIngredient>,
    {
        for ingredient in ingredients {
            self.add(ingredient);
        }
    }

    /// Buckets in insertion order
    pub fn buckets(&self) -> &[AggregatedBucket] {
        &self.buckets
    }

    pub fn into_buckets(self) -> Vec<AggregatedBucket> {
        self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn disambiguate(&mut self, ingredient: StandardizedIngredient) {
        let key = format!(
            "{} (in {})",
            ingredient.normalized_name, ingredient.std_unit
        );
        debug!(
            "Unit mismatch for '{}', keeping {} {} in '{}'",
            ingredient.normalized_name, ingredient.std_quantity, ingredient.std_unit, key
        );

        match self.index.get(&key) {
            Some(&position) => {
                self.buckets[position].absorb(ingredient.std_quantity, ingredient.source_recipe_id)
            }
            None => self.open_bucket(key, ingredient),
        }
    }

    fn open_bucket(&mut self, key: String, ingredient: StandardizedIngredient) {
        self.index.insert(key.clone(), self.buckets.len());
        self.buckets.push(AggregatedBucket::open(key, ingredient));
    }
}

/// Aggregate a batch of contributions
pub fn aggregate<I>(ingredients: I, policy: MergePolicy) -> Vec<AggregatedBucket>
where
    I: IntoIterator<Item = StandardizedIngredient>,
{
    let mut aggregator = Aggregator::new(policy);
    aggregator.extend(ingredients);
    aggregator.into_buckets()
}
