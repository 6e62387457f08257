// ABOUTME: sqlx error conversion into AppError
// ABOUTME: Maps unique constraint violations to RESOURCE_ALREADY_EXISTS
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use super::{AppError, ErrorCode};

/// Whether a sqlx error is a UNIQUE constraint violation
#[must_use]
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        let code = if is_unique_violation(&error) {
            ErrorCode::ResourceAlreadyExists
        } else {
            ErrorCode::DatabaseError
        };
        Self::new(code, format!("Database operation failed: {error}")).with_source(error)
    }
}
