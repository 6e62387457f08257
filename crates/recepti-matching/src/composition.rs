// ABOUTME: Turns authored ingredient inputs into stored entries, canonical keys and allergens
// ABOUTME: Enforces the recipe invariants that keys and allergens derive from the ingredients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use crate::catalog::IngredientCatalog;
use recepti_core::errors::{AppError, AppResult};
use recepti_core::models::{IngredientEntry, IngredientInput};
use serde::Serialize;
use std::collections::BTreeSet;

/// Derived ingredient data for a new recipe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeComposition {
    /// Entries in authoring order, blank names dropped
    pub ingredients: Vec<IngredientEntry>,
    /// Sorted unique non-empty keys
    pub ingredient_keys: Vec<String>,
    /// Sorted allergen categories
    pub allergens: Vec<String>,
}

impl RecipeComposition {
    /// Normalize, canonicalize and classify authored ingredients
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` when no ingredient has a non-blank name
    pub fn from_inputs(catalog: &IngredientCatalog, inputs: &[IngredientInput]) -> AppResult<Self> {
        let ingredients: Vec<IngredientEntry> = inputs
            .iter()
            .filter_map(|input| Self::entry(catalog, input))
            .collect();

        if ingredients.is_empty() {
            return Err(AppError::invalid_input(
                "Recipe needs at least one ingredient with a name",
            ));
        }

        let ingredient_keys: Vec<String> = ingredients
            .iter()
            .filter(|entry| !entry.key.is_empty())
            .map(|entry| entry.key.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let names: Vec<&str> = ingredients.iter().map(|e| e.name.as_str()).collect();
        let allergens = catalog.allergens().detect(&ingredient_keys, &names);

        Ok(Self {
            ingredients,
            ingredient_keys,
            allergens,
        })
    }

    fn entry(catalog: &IngredientCatalog, input: &IngredientInput) -> Option<IngredientEntry> {
        let name = input.name.trim();
        if name.is_empty() {
            return None;
        }

        let unit = input
            .unit
            .as_deref()
            .map(str::trim)
            .filter(|unit| !unit.is_empty())
            .map(str::to_owned);

        Some(IngredientEntry {
            name: name.to_owned(),
            key: catalog.canonical_key(name),
            quantity: input.quantity,
            unit,
        })
    }
}
