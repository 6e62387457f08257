// ABOUTME: Ingredient matching engine for the Recepti recipe sharing service
// ABOUTME: Key normalization, allergen classification, query building and pantry ranking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

#![deny(unsafe_code)]

//! # Recepti Matching
//!
//! Pure, synchronous matching logic. Nothing here touches storage or the
//! network; the server crate feeds it recipes and user input and persists the
//! results.
//!
//! Data flow: raw text → [`normalize_key`] → [`SynonymTable`] → canonical keys,
//! which feed the [`AllergenRuleSet`] at recipe creation and the
//! [`build_filter`] / [`PantryRanker`] at search time.

/// Allergen classifier
pub mod allergens;
/// Synonyms plus allergen rules, loaded once at startup
pub mod catalog;
/// Authored ingredients to stored entries, keys and allergens
pub mod composition;
/// Key normalizer and synonym table
pub mod normalize;
/// Recipe view used by filters and ranking
pub mod profile;
/// Include / any-of / exclude / exclude-allergens filters
pub mod query;
/// Pantry overlap ranking
pub mod ranking;

pub use allergens::AllergenRuleSet;
pub use catalog::IngredientCatalog;
pub use composition::RecipeComposition;
pub use normalize::{normalize_key, SynonymTable};
pub use profile::IngredientProfile;
pub use query::{build_filter, Constraint, IngredientFilter};
pub use ranking::{MatchResult, PantryQuery, PantryRanker};
