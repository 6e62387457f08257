// ABOUTME: Ingredient analysis route: raw names in, canonical keys and allergens out
// ABOUTME: Lets clients preview what a recipe's ingredient list will be stored as
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use crate::errors::AppError;
use crate::resources::ServerResources;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Body for POST /api/ingredients/analyze
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Ingredient names as typed by a user
    pub ingredients: Vec<String>,
}

/// Ingredient routes
pub struct IngredientRoutes;

impl IngredientRoutes {
    /// Create all ingredient routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/ingredients/analyze", post(Self::handle_analyze))
            .with_state(resources)
    }

    async fn handle_analyze(
        State(resources): State<Arc<ServerResources>>,
        request: Result<Json<AnalyzeRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) = request?;
        let analysis = resources.recipes.analyze(&request.ingredients)?;
        Ok((StatusCode::OK, Json(analysis)).into_response())
    }
}
