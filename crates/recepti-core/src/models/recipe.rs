// ABOUTME: Recipe domain models: ingredients, full recipes and enriched list projections
// ABOUTME: Recipes are written once at creation and never mutated in place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ingredient as typed by the author, before normalization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientInput {
    /// Free-text ingredient name
    #[serde(default)]
    pub name: String,
    /// Optional amount
    #[serde(default)]
    pub quantity: Option<f64>,
    /// Optional unit (`g`, `ml`, `kom`, ...)
    #[serde(default)]
    pub unit: Option<String>,
}

impl IngredientInput {
    /// Ingredient with a name only
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
            unit: None,
        }
    }

    /// Ingredient with an amount and unit
    pub fn with_amount(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: Some(quantity),
            unit: Some(unit.into()),
        }
    }
}

/// Ingredient stored on a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientEntry {
    /// Name as written by the author (trimmed)
    pub name: String,
    /// Canonical ingredient key, may be empty when the name has no usable characters
    pub key: String,
    /// Optional amount
    pub quantity: Option<f64>,
    /// Optional unit, `None` when blank
    pub unit: Option<String>,
}

/// A complete recipe
///
/// `ingredient_keys` is the sorted, deduplicated set of non-empty ingredient
/// keys and `allergens` the classifier output computed at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique recipe identifier
    pub id: Uuid,
    /// Author user ID
    pub author_id: Uuid,
    /// Recipe title
    pub title: String,
    /// Free-text description, may be empty
    pub description: String,
    /// Ingredients in authoring order
    pub ingredients: Vec<IngredientEntry>,
    /// Sorted unique canonical keys
    pub ingredient_keys: Vec<String>,
    /// Ordered preparation steps
    pub steps: Vec<String>,
    /// Sorted allergen categories
    pub allergens: Vec<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Request to create a recipe
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRecipeRequest {
    /// Recipe title
    pub title: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Ingredients as typed
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
    /// Preparation steps
    #[serde(default)]
    pub steps: Vec<String>,
}

/// Recipe row joined with its author and social counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSummary {
    /// Recipe ID
    pub id: Uuid,
    /// Recipe title
    pub title: String,
    /// Sorted unique canonical keys
    pub ingredient_keys: Vec<String>,
    /// Sorted allergen categories
    pub allergens: Vec<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Author username, absent when the author row is gone
    pub author_username: Option<String>,
    /// Author display name, absent when the author row is gone
    pub author_display_name: Option<String>,
    /// Number of users who saved the recipe
    pub save_count: u32,
    /// Number of comments on the recipe
    pub comment_count: u32,
}

/// Result of creating a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedRecipe {
    /// New recipe ID
    pub id: Uuid,
    /// Keys computed from the ingredients
    pub ingredient_keys: Vec<String>,
    /// Allergens detected from the ingredients
    pub allergens: Vec<String>,
}

impl From<&Recipe> for CreatedRecipe {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            ingredient_keys: recipe.ingredient_keys.clone(),
            allergens: recipe.allergens.clone(),
        }
    }
}
