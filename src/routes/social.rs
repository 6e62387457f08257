// ABOUTME: Saved recipe and comment route handlers
// ABOUTME: Writing requires a bearer token; save counts and comment lists are public
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use super::{authenticate, ListResponse};
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::parse_recipe_id;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Body for POST /api/recipes/:id/comments
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    /// Comment text
    pub text: String,
}

/// Limit-only query string
#[derive(Debug, Deserialize, Default)]
pub struct SocialLimitQuery {
    /// Maximum number of results
    pub limit: Option<i64>,
}

/// Saves and comments routes
pub struct SocialRoutes;

impl SocialRoutes {
    /// Create all social routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/recipes/:id/save",
                post(Self::handle_save).delete(Self::handle_unsave),
            )
            .route("/api/recipes/:id/saves", get(Self::handle_save_count))
            .route(
                "/api/recipes/:id/comments",
                get(Self::handle_list_comments).post(Self::handle_add_comment),
            )
            .route("/api/saved", get(Self::handle_list_saved))
            .route("/api/saved/ids", get(Self::handle_saved_ids))
            .with_state(resources)
    }

    /// Handle POST /api/recipes/:id/save
    async fn handle_save(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let recipe_id = parse_recipe_id(&id)?;
        resources.social.save(user.id, recipe_id).await?;

        let body = serde_json::json!({ "recipe_id": recipe_id, "saved": true });
        Ok((StatusCode::CREATED, Json(body)).into_response())
    }

    /// Handle DELETE /api/recipes/:id/save
    async fn handle_unsave(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let recipe_id = parse_recipe_id(&id)?;
        let removed = resources.social.unsave(user.id, recipe_id).await?;

        let body = serde_json::json!({ "recipe_id": recipe_id, "removed": removed });
        Ok((StatusCode::OK, Json(body)).into_response())
    }

    /// Handle GET /api/recipes/:id/saves
    async fn handle_save_count(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let count = resources.social.save_count(parse_recipe_id(&id)?).await?;
        Ok((StatusCode::OK, Json(count)).into_response())
    }

    /// Handle GET /api/recipes/:id/comments
    async fn handle_list_comments(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        query: Result<Query<SocialLimitQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let Query(query) = query?;
        let comments = resources
            .social
            .list_comments(parse_recipe_id(&id)?, query.limit)
            .await?;
        Ok((StatusCode::OK, Json(comments)).into_response())
    }

    /// Handle POST /api/recipes/:id/comments
    async fn handle_add_comment(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        request: Result<Json<AddCommentRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let Json(request) = request?;
        let comment = resources
            .social
            .add_comment(user.id, parse_recipe_id(&id)?, &request.text)
            .await?;
        Ok((StatusCode::CREATED, Json(comment)).into_response())
    }

    /// Handle GET /api/saved
    async fn handle_list_saved(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        query: Result<Query<SocialLimitQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let Query(query) = query?;
        let saved = resources.social.list_saved(user.id, query.limit).await?;
        Ok((StatusCode::OK, Json(ListResponse::from(saved))).into_response())
    }

    /// Handle GET /api/saved/ids
    async fn handle_saved_ids(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let ids = resources.social.saved_ids(user.id).await?;
        Ok((StatusCode::OK, Json(ListResponse::from(ids))).into_response())
    }
}
