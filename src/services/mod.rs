// ABOUTME: Protocol-agnostic business logic shared by the HTTP routes and the CLI
// ABOUTME: Input validation, limit resolution and orchestration of storage and matching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

//! Service layer
//!
//! Route handlers and the CLI parse their inputs and delegate here; nothing in
//! this module knows about HTTP.

pub mod accounts;
pub mod recipes;
pub mod social;

pub use accounts::{AccountService, AuthSession};
pub use recipes::RecipeService;
pub use social::SocialService;

use crate::errors::{AppError, AppResult};
use uuid::Uuid;

/// Resolve an optional caller-supplied limit
///
/// # Errors
///
/// Returns `INVALID_INPUT` for a non-positive limit and `VALUE_OUT_OF_RANGE`
/// above `max`
pub fn resolve_limit(requested: Option<i64>, default: u32, max: u32) -> AppResult<u32> {
    let Some(requested) = requested else {
        return Ok(default);
    };
    if requested <= 0 {
        return Err(AppError::invalid_input("limit must be a positive integer"));
    }
    match u32::try_from(requested) {
        Ok(limit) if limit <= max => Ok(limit),
        _ => Err(AppError::out_of_range(format!(
            "limit must not exceed {max}"
        ))),
    }
}

/// Parse a recipe id from a path segment
///
/// # Errors
///
/// Returns `INVALID_INPUT` if the value is not a UUID
pub fn parse_recipe_id(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| AppError::invalid_input(format!("Invalid recipe id: {value}")))
}
