// ABOUTME: Read-only view of a recipe's ingredient composition used by filters and ranking
// ABOUTME: Implemented for full recipes and for enriched list summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use chrono::{DateTime, Utc};
use recepti_core::models::{Recipe, RecipeSummary};
use uuid::Uuid;

/// What matching needs to know about a recipe
pub trait IngredientProfile {
    /// Stable identifier, last ranking tie-break
    fn id(&self) -> Uuid;
    /// Sorted unique canonical keys
    fn ingredient_keys(&self) -> &[String];
    /// Sorted allergen categories
    fn allergens(&self) -> &[String];
    /// Creation time, used for recency ordering
    fn created_at(&self) -> DateTime<Utc>;
}

impl IngredientProfile for Recipe {
    fn id(&self) -> Uuid {
        self.id
    }

    fn ingredient_keys(&self) -> &[String] {
        &self.ingredient_keys
    }

    fn allergens(&self) -> &[String] {
        &self.allergens
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl IngredientProfile for RecipeSummary {
    fn id(&self) -> Uuid {
        self.id
    }

    fn ingredient_keys(&self) -> &[String] {
        &self.ingredient_keys
    }

    fn allergens(&self) -> &[String] {
        &self.allergens
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
