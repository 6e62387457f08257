// ABOUTME: Pantry ranker scoring recipes by overlap with the ingredients a user has at hand
// ABOUTME: Explicit ordered pipeline: allergen filter, overlap, min-match gate, sort, limit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

//! # Pantry Ranking
//!
//! Candidates arrive already enriched by the storage layer (author, save and
//! comment counts). The ranker then runs these stages in order:
//!
//! 1. drop recipes carrying an excluded allergen
//! 2. compute `match_keys = keys ∩ pantry` and `match_count`
//! 3. keep `match_count >= min_match`
//! 4. sort by `match_count` desc, `created_at` desc, `id` asc
//! 5. truncate to `limit`

use crate::profile::IngredientProfile;
use recepti_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::debug;

/// Validated pantry ranking request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PantryQuery {
    pantry_keys: BTreeSet<String>,
    min_match: u32,
    excluded_allergens: BTreeSet<String>,
    limit: u32,
}

impl PantryQuery {
    /// Create a query
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` if `min_match` or `limit` is zero
    pub fn new(
        pantry_keys: BTreeSet<String>,
        min_match: u32,
        excluded_allergens: BTreeSet<String>,
        limit: u32,
    ) -> AppResult<Self> {
        if min_match == 0 {
            return Err(AppError::invalid_input("min_match must be at least 1"));
        }
        if limit == 0 {
            return Err(AppError::invalid_input("limit must be at least 1"));
        }
        Ok(Self {
            pantry_keys,
            min_match,
            excluded_allergens,
            limit,
        })
    }

    /// Canonical pantry keys
    #[must_use]
    pub const fn pantry_keys(&self) -> &BTreeSet<String> {
        &self.pantry_keys
    }

    /// Minimum overlap for a recipe to be kept
    #[must_use]
    pub const fn min_match(&self) -> u32 {
        self.min_match
    }

    /// Allergen categories to exclude
    #[must_use]
    pub const fn excluded_allergens(&self) -> &BTreeSet<String> {
        &self.excluded_allergens
    }

    /// Maximum number of results
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }
}

/// A ranked recipe with its pantry overlap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult<R> {
    /// The candidate recipe
    #[serde(flatten)]
    pub recipe: R,
    /// Sorted keys shared with the pantry
    pub match_keys: Vec<String>,
    /// Number of shared keys
    pub match_count: u32,
}

/// Scores candidates against a pantry
pub struct PantryRanker;

impl PantryRanker {
    /// Rank candidates for a pantry query
    ///
    /// An empty pantry yields no results since every overlap is zero.
    pub fn rank<R, I>(query: &PantryQuery, candidates: I) -> Vec<MatchResult<R>>
    where
        R: IngredientProfile,
        I: IntoIterator<Item = R>,
    {
        let candidates: Vec<R> = candidates.into_iter().collect();
        let total = candidates.len();

        let allowed = Self::exclude_allergens(query, candidates);
        let scored = Self::compute_overlap(query, allowed);
        let mut kept = Self::min_match(query, scored);
        Self::sort(&mut kept);
        kept.truncate(query.limit as usize);

        debug!(
            candidates = total,
            results = kept.len(),
            pantry_size = query.pantry_keys.len(),
            min_match = query.min_match,
            "Ranked pantry candidates"
        );
        kept
    }

    fn exclude_allergens<R: IngredientProfile>(query: &PantryQuery, candidates: Vec<R>) -> Vec<R> {
        if query.excluded_allergens.is_empty() {
            return candidates;
        }
        candidates
            .into_iter()
            .filter(|recipe| {
                !recipe
                    .allergens()
                    .iter()
                    .any(|a| query.excluded_allergens.contains(a))
            })
            .collect()
    }

    fn compute_overlap<R: IngredientProfile>(
        query: &PantryQuery,
        candidates: Vec<R>,
    ) -> Vec<MatchResult<R>> {
        candidates
            .into_iter()
            .map(|recipe| {
                let match_keys: Vec<String> = recipe
                    .ingredient_keys()
                    .iter()
                    .filter(|key| query.pantry_keys.contains(*key))
                    .cloned()
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect();
                let match_count = u32::try_from(match_keys.len()).unwrap_or(u32::MAX);
                MatchResult {
                    recipe,
                    match_keys,
                    match_count,
                }
            })
            .collect()
    }

    fn min_match<R>(query: &PantryQuery, scored: Vec<MatchResult<R>>) -> Vec<MatchResult<R>> {
        scored
            .into_iter()
            .filter(|result| result.match_count >= query.min_match)
            .collect()
    }

    fn sort<R: IngredientProfile>(results: &mut [MatchResult<R>]) {
        results.sort_by(Self::compare);
    }

    fn compare<R: IngredientProfile>(a: &MatchResult<R>, b: &MatchResult<R>) -> Ordering {
        b.match_count
            .cmp(&a.match_count)
            .then_with(|| b.recipe.created_at().cmp(&a.recipe.created_at()))
            .then_with(|| a.recipe.id().cmp(&b.recipe.id()))
    }
}
