// ABOUTME: Account registration and login route handlers
// ABOUTME: Both endpoints answer with the public user and a bearer token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use crate::errors::AppError;
use crate::models::{LoginRequest, RegisterRequest};
use crate::resources::ServerResources;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .with_state(resources)
    }

    /// Handle POST /api/auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        request: Result<Json<RegisterRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) = request?;
        let session = resources.accounts.register(&request).await?;
        Ok((StatusCode::CREATED, Json(session)).into_response())
    }

    /// Handle POST /api/auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        request: Result<Json<LoginRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) = request?;
        let session = resources.accounts.login(&request).await?;
        Ok((StatusCode::OK, Json(session)).into_response())
    }
}
