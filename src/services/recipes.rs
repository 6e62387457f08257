// ABOUTME: Recipe creation, listing, ingredient search and pantry ranking
// ABOUTME: Keys and allergens are computed at creation and stored with the recipe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use super::resolve_limit;
use crate::config::LimitsConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{CreateRecipeRequest, IngredientInput, Recipe, RecipeSummary};
use chrono::Utc;
use recepti_matching::{
    build_filter, IngredientCatalog, MatchResult, PantryQuery, PantryRanker, RecipeComposition,
};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Ingredient search parameters, each a comma separated list
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Every key must be present
    pub include: String,
    /// At least one key must be present
    pub any_of: String,
    /// No key may be present
    pub exclude: String,
    /// No allergen category may be present
    pub exclude_allergens: String,
    /// Requested result limit
    pub limit: Option<i64>,
}

/// Pantry ranking parameters
#[derive(Debug, Clone, Default)]
pub struct PantryParams {
    /// Comma separated pantry ingredients
    pub pantry: String,
    /// Minimum number of shared keys
    pub min_match: Option<i64>,
    /// Comma separated allergen categories to avoid
    pub exclude_allergens: String,
    /// Requested result limit
    pub limit: Option<i64>,
}

/// Recipe operations
#[derive(Clone)]
pub struct RecipeService {
    database: Database,
    catalog: Arc<IngredientCatalog>,
    limits: LimitsConfig,
}

impl RecipeService {
    /// Create the recipe service
    #[must_use]
    pub const fn new(
        database: Database,
        catalog: Arc<IngredientCatalog>,
        limits: LimitsConfig,
    ) -> Self {
        Self {
            database,
            catalog,
            limits,
        }
    }

    /// Ingredient catalog in use
    #[must_use]
    pub fn catalog(&self) -> &IngredientCatalog {
        &self.catalog
    }

    /// Keys and allergens for a list of ingredient names
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` when every name is blank
    pub fn analyze(&self, names: &[String]) -> AppResult<RecipeComposition> {
        let inputs: Vec<IngredientInput> = names.iter().map(IngredientInput::named).collect();
        RecipeComposition::from_inputs(&self.catalog, &inputs)
    }

    /// Create a recipe for an author
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for a blank title or no usable ingredient
    pub async fn create(&self, author_id: Uuid, request: &CreateRecipeRequest) -> AppResult<Recipe> {
        let title = request.title.trim();
        if title.is_empty() {
            return Err(AppError::invalid_input("Recipe title must not be empty"));
        }

        let composition = RecipeComposition::from_inputs(&self.catalog, &request.ingredients)?;
        let steps = request
            .steps
            .iter()
            .map(String::as_str)
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .map(str::to_owned)
            .collect();

        let recipe = Recipe {
            id: Uuid::new_v4(),
            author_id,
            title: title.to_owned(),
            description: request
                .description
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_owned(),
            ingredients: composition.ingredients,
            ingredient_keys: composition.ingredient_keys,
            steps,
            allergens: composition.allergens,
            created_at: Utc::now(),
        };

        self.database.recipes().insert(&recipe).await?;
        info!(
            recipe_id = %recipe.id,
            author_id = %author_id,
            keys = recipe.ingredient_keys.len(),
            allergens = ?recipe.allergens,
            "Created recipe"
        );
        Ok(recipe)
    }

    /// Full recipe by id
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown id
    pub async fn get(&self, recipe_id: Uuid) -> AppResult<Recipe> {
        self.database
            .recipes()
            .get(recipe_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Recipe {recipe_id}"))
                    .with_resource_id(recipe_id.to_string())
            })
    }

    /// Recipes authored by a user, newest first
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid limit or a database failure
    pub async fn list_mine(&self, author_id: Uuid, limit: Option<i64>) -> AppResult<Vec<Recipe>> {
        let limit = self.resolve_limit(limit)?;
        self.database.recipes().list_by_author(author_id, limit).await
    }

    /// Enriched recipes, newest first, optionally by one author
    ///
    /// An unknown username yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid limit or a database failure
    pub async fn list_all(
        &self,
        username: Option<&str>,
        limit: Option<i64>,
    ) -> AppResult<Vec<RecipeSummary>> {
        let limit = self.resolve_limit(limit)?;

        let author_id = match username.map(str::trim).filter(|name| !name.is_empty()) {
            Some(username) => match self.database.users().get_by_username(username).await? {
                Some(user) => Some(user.id),
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        self.database.recipes().list_enriched(author_id, limit).await
    }

    /// Recipes matching ingredient constraints, newest first
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid limit or a database failure
    pub async fn search(&self, params: &SearchParams) -> AppResult<Vec<RecipeSummary>> {
        let limit = self.resolve_limit(params.limit)?;
        let filter = build_filter(
            &self.catalog,
            &params.include,
            &params.any_of,
            &params.exclude,
            &params.exclude_allergens,
        );
        debug!(constraints = ?filter.constraints(), limit, "Searching recipes");

        self.database.recipes().search(&filter, limit).await
    }

    /// Rank recipes by overlap with the pantry
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for an empty pantry or a non-positive
    /// `min_match`/`limit`, `VALUE_OUT_OF_RANGE` for a limit above the maximum
    pub async fn pantry(
        &self,
        params: &PantryParams,
    ) -> AppResult<Vec<MatchResult<RecipeSummary>>> {
        let pantry_keys = self.catalog.parse_csv(&params.pantry);
        if pantry_keys.is_empty() {
            return Err(AppError::invalid_input(
                "Pantry must contain at least one ingredient",
            ));
        }

        let min_match = match params.min_match {
            None => crate::constants::limits::DEFAULT_MIN_MATCH,
            Some(value) => u32::try_from(value)
                .ok()
                .filter(|value| *value > 0)
                .ok_or_else(|| AppError::invalid_input("min_match must be a positive integer"))?,
        };
        let limit = self.resolve_limit(params.limit)?;
        let excluded = self.catalog.parse_csv(&params.exclude_allergens);

        let query = PantryQuery::new(pantry_keys, min_match, excluded, limit)?;
        let candidates = self.database.recipes().pantry_candidates(&query).await?;
        let ranked = PantryRanker::rank(&query, candidates);

        debug!(
            pantry = ?query.pantry_keys(),
            min_match,
            results = ranked.len(),
            "Ranked pantry matches"
        );
        Ok(ranked)
    }

    fn resolve_limit(&self, requested: Option<i64>) -> AppResult<u32> {
        resolve_limit(
            requested,
            self.limits.default_result_limit,
            self.limits.max_result_limit,
        )
    }
}
