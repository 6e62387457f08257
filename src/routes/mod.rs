// ABOUTME: Route module organization for the Recepti HTTP API
// ABOUTME: Domain route groups plus the bearer token helper shared by authenticated handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

//! Route module for the Recepti server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// Registration and login routes
pub mod auth;
/// Health check and readiness routes
pub mod health;
/// Ingredient analysis routes
pub mod ingredients;
/// Recipe listing, search and pantry routes
pub mod recipes;
/// Saves and comments routes
pub mod social;

pub use auth::AuthRoutes;
pub use health::HealthRoutes;
pub use ingredients::IngredientRoutes;
pub use recipes::RecipeRoutes;
pub use social::SocialRoutes;

use crate::errors::{AppError, AppResult};
use crate::models::User;
use crate::resources::ServerResources;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use serde::Serialize;

/// Extract and authenticate the user from the `Authorization: Bearer` header
///
/// # Errors
///
/// Returns `AUTH_REQUIRED` without a header, `AUTH_INVALID` for a malformed
/// header or bad token, `AUTH_EXPIRED` for an expired token
pub(crate) async fn authenticate(
    headers: &HeaderMap,
    resources: &ServerResources,
) -> AppResult<User> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Err(AppError::auth_required());
    };
    let value = value
        .to_str()
        .map_err(|_| AppError::auth_invalid("Authorization header is not valid text"))?;
    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::auth_invalid("Authorization header must be 'Bearer <token>'"))?;

    resources.accounts.authenticate(token).await
}

/// List payload with its length
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    /// Items in response order
    pub items: Vec<T>,
    /// Number of items
    pub count: usize,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}
