// ABOUTME: Recipe route handlers: create, fetch, list, ingredient search and pantry ranking
// ABOUTME: Query strings carry comma separated ingredient lists that the service normalizes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

//! Recipe routes
//!
//! Creating and listing one's own recipes requires a bearer token; browsing,
//! searching and pantry ranking are public.

use super::{authenticate, ListResponse};
use crate::errors::AppError;
use crate::models::{CreateRecipeRequest, CreatedRecipe};
use crate::resources::ServerResources;
use crate::services::parse_recipe_id;
use crate::services::recipes::{PantryParams, SearchParams};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters for GET /api/recipes
#[derive(Debug, Deserialize, Default)]
pub struct ListRecipesQuery {
    /// Only recipes by this author
    pub username: Option<String>,
    /// Maximum number of results
    pub limit: Option<i64>,
}

/// Query parameters for GET /api/recipes/mine
#[derive(Debug, Deserialize, Default)]
pub struct LimitQuery {
    /// Maximum number of results
    pub limit: Option<i64>,
}

/// Query parameters for GET /api/recipes/search
#[derive(Debug, Deserialize, Default)]
pub struct SearchQuery {
    /// Every listed ingredient must be present
    pub include: Option<String>,
    /// At least one listed ingredient must be present
    pub any_of: Option<String>,
    /// None of the listed ingredients may be present
    pub exclude: Option<String>,
    /// None of the listed allergen categories may be present
    pub exclude_allergens: Option<String>,
    /// Maximum number of results
    pub limit: Option<i64>,
}

impl From<SearchQuery> for SearchParams {
    fn from(query: SearchQuery) -> Self {
        Self {
            include: query.include.unwrap_or_default(),
            any_of: query.any_of.unwrap_or_default(),
            exclude: query.exclude.unwrap_or_default(),
            exclude_allergens: query.exclude_allergens.unwrap_or_default(),
            limit: query.limit,
        }
    }
}

/// Query parameters for GET /api/recipes/pantry
#[derive(Debug, Deserialize, Default)]
pub struct PantryQueryParams {
    /// Ingredients on hand
    pub pantry: Option<String>,
    /// Minimum number of shared ingredients
    pub min_match: Option<i64>,
    /// Allergen categories to avoid
    pub exclude_allergens: Option<String>,
    /// Maximum number of results
    pub limit: Option<i64>,
}

impl From<PantryQueryParams> for PantryParams {
    fn from(query: PantryQueryParams) -> Self {
        Self {
            pantry: query.pantry.unwrap_or_default(),
            min_match: query.min_match,
            exclude_allergens: query.exclude_allergens.unwrap_or_default(),
            limit: query.limit,
        }
    }
}

/// Recipe routes
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/recipes",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/api/recipes/mine", get(Self::handle_list_mine))
            .route("/api/recipes/search", get(Self::handle_search))
            .route("/api/recipes/pantry", get(Self::handle_pantry))
            .route("/api/recipes/:id", get(Self::handle_get))
            .with_state(resources)
    }

    /// Handle GET /api/recipes
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        query: Result<Query<ListRecipesQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let Query(query) = query?;
        let recipes = resources
            .recipes
            .list_all(query.username.as_deref(), query.limit)
            .await?;
        Ok((StatusCode::OK, Json(ListResponse::from(recipes))).into_response())
    }

    /// Handle POST /api/recipes
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        request: Result<Json<CreateRecipeRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let Json(request) = request?;
        let recipe = resources.recipes.create(user.id, &request).await?;
        Ok((StatusCode::CREATED, Json(CreatedRecipe::from(&recipe))).into_response())
    }

    /// Handle GET /api/recipes/mine
    async fn handle_list_mine(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        query: Result<Query<LimitQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let Query(query) = query?;
        let recipes = resources.recipes.list_mine(user.id, query.limit).await?;
        Ok((StatusCode::OK, Json(ListResponse::from(recipes))).into_response())
    }

    /// Handle GET /api/recipes/search
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        query: Result<Query<SearchQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let Query(query) = query?;
        let recipes = resources.recipes.search(&query.into()).await?;
        Ok((StatusCode::OK, Json(ListResponse::from(recipes))).into_response())
    }

    /// Handle GET /api/recipes/pantry
    async fn handle_pantry(
        State(resources): State<Arc<ServerResources>>,
        query: Result<Query<PantryQueryParams>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let Query(query) = query?;
        let matches = resources.recipes.pantry(&query.into()).await?;
        Ok((StatusCode::OK, Json(ListResponse::from(matches))).into_response())
    }

    /// Handle GET /api/recipes/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let recipe = resources.recipes.get(parse_recipe_id(&id)?).await?;
        Ok((StatusCode::OK, Json(recipe)).into_response())
    }
}
