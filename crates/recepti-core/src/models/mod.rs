// ABOUTME: Core data models for the Recepti service
// ABOUTME: Re-exports user, recipe and social types plus timestamp helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

//! # Data Models
//!
//! - `User` / `PublicUser`: accounts
//! - `Recipe` / `IngredientEntry` / `RecipeSummary`: recipes and their list projection
//! - `SavedRecipe` / `Comment` / `CommentView`: social bookkeeping

mod recipe;
mod social;
mod user;

pub use recipe::{
    CreateRecipeRequest, CreatedRecipe, IngredientEntry, IngredientInput, Recipe, RecipeSummary,
};
pub use social::{Comment, CommentView, RecipeComments, SaveCount, SavedRecipe};
pub use user::{LoginRequest, PublicUser, RegisterRequest, User};

/// Timestamp encoding shared by storage and API layers
pub mod timestamp {
    use crate::errors::{AppError, AppResult};
    use chrono::{DateTime, SecondsFormat, Utc};

    /// Fixed-width RFC 3339 (microseconds, `Z`) so lexical order is chronological
    #[must_use]
    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Parse an RFC 3339 timestamp into UTC
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not valid RFC 3339
    pub fn parse(value: &str) -> AppResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| AppError::internal(format!("Invalid datetime '{value}': {e}")))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::TimeZone;

        #[test]
        fn test_format_is_fixed_width_and_ordered() {
            let earlier = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
            let later = earlier + chrono::Duration::milliseconds(1500);

            let a = format(&earlier);
            let b = format(&later);
            assert_eq!(a, "2025-01-02T03:04:05.000000Z");
            assert_eq!(a.len(), b.len());
            assert!(a < b);
            assert_eq!(parse(&b).unwrap(), later);
        }
    }
}
