//! # Engine Configuration Module
//!
//! This module defines the configuration of the consolidation engine: how
//! unit mismatches are merged, how close an amount must be to snap to a
//! fraction, optional servings scaling and the name length limit.
//!
//! Values come from [`EngineConfig::default`] or from `GROCERY_*` environment
//! variables via [`EngineConfig::from_env`].

use crate::errors::GroceryError;
use std::env;
use std::str::FromStr;

// Constants for engine configuration
pub const DEFAULT_FRACTION_TOLERANCE: f64 = 0.01;
pub const DEFAULT_MAX_NAME_LENGTH: usize = 100;

pub const ENV_MERGE_POLICY: &str = "GROCERY_MERGE_POLICY";
pub const ENV_FRACTION_TOLERANCE: &str = "GROCERY_FRACTION_TOLERANCE";
pub const ENV_TARGET_SERVINGS: &str = "GROCERY_TARGET_SERVINGS";
pub const ENV_MAX_NAME_LENGTH: &str = "GROCERY_MAX_NAME_LENGTH";

/// What to do when contributions to one ingredient use incompatible standard units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Keep a separate `"{name} (in {unit})"` line for the odd contribution
    #[default]
    Disambiguate,
    /// Merge milliliters and grams at 1 g/ml when no density is known
    ForceMerge,
}

impl FromStr for MergePolicy {
    type Err = GroceryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "disambiguate" => Ok(MergePolicy::Disambiguate),
            "force-merge" | "force_merge" | "forcemerge" => Ok(MergePolicy::ForceMerge),
            other => Err(GroceryError::Config(format!(
                "unknown merge policy '{other}', expected 'disambiguate' or 'force-merge'"
            ))),
        }
    }
}

/// Configuration structure for shopping list generation
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Merge behavior for ml/g mismatches
    pub merge_policy: MergePolicy,
    /// Maximum distance for snapping an amount to a common fraction
    pub fraction_tolerance: f64,
    /// Scale every recipe to this many servings when set
    pub target_servings: Option<f64>,
    /// Ingredient names longer than this are truncated before cleaning
    pub max_name_length: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            merge_policy: MergePolicy::default(),
            fraction_tolerance: DEFAULT_FRACTION_TOLERANCE,
            target_servings: None,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }
}

impl EngineConfig {
    /// Build a configuration from `GROCERY_*` environment variables, defaulting unset ones
    pub fn from_env() -> Result<Self, GroceryError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GroceryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(policy) = lookup(ENV_MERGE_POLICY) {
            config.merge_policy = policy.parse()?;
        }

        if let Some(tolerance) = lookup(ENV_FRACTION_TOLERANCE) {
            let tolerance: f64 = parse_value(ENV_FRACTION_TOLERANCE, &tolerance)?;
            if !(0.0..0.5).contains(&tolerance) {
                return Err(GroceryError::Config(format!(
                    "{ENV_FRACTION_TOLERANCE} must be in [0, 0.5), got {tolerance}"
                )));
            }
            config.fraction_tolerance = tolerance;
        }

        if let Some(servings) = lookup(ENV_TARGET_SERVINGS) {
            let servings: f64 = parse_value(ENV_TARGET_SERVINGS, &servings)?;
            config = config.with_target_servings(servings)?;
        }

        if let Some(length) = lookup(ENV_MAX_NAME_LENGTH) {
            let length: usize = parse_value(ENV_MAX_NAME_LENGTH, &length)?;
            if length == 0 {
                return Err(GroceryError::Config(format!(
                    "{ENV_MAX_NAME_LENGTH} must be positive"
                )));
            }
            config.max_name_length = length;
        }

        Ok(config)
    }

    /// Set the merge policy
    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    /// Scale every recipe to the given number of servings
    pub fn with_target_servings(mut self, servings: f64) -> Result<Self, GroceryError> {
        if !servings.is_finite() || servings <= 0.0 {
            return Err(GroceryError::Config(format!(
                "target servings must be a positive number, got {servings}"
            )));
        }
        self.target_servings = Some(servings);
        Ok(self)
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, GroceryError> {
    value
        .trim()
        .parse()
        .map_err(|_| GroceryError::Config(format!("invalid value '{value}' for {key}")))
}
