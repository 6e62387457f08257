// ABOUTME: Saving recipes as favorites and commenting on them
// ABOUTME: Every operation on a recipe first checks that the recipe exists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use super::resolve_limit;
use crate::config::LimitsConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Comment, CommentView, RecipeComments, SaveCount, SavedRecipe};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

/// Favorites and comments
#[derive(Clone)]
pub struct SocialService {
    database: Database,
    limits: LimitsConfig,
}

impl SocialService {
    /// Create the social service
    #[must_use]
    pub const fn new(database: Database, limits: LimitsConfig) -> Self {
        Self { database, limits }
    }

    async fn recipe_title(&self, recipe_id: Uuid) -> AppResult<String> {
        self.database
            .recipes()
            .title(recipe_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Recipe {recipe_id}"))
                    .with_resource_id(recipe_id.to_string())
            })
    }

    /// Save a recipe for a user
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown recipe and
    /// `RESOURCE_ALREADY_EXISTS` if it is already saved
    pub async fn save(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<()> {
        self.recipe_title(recipe_id).await?;
        self.database.saves().save(user_id, recipe_id).await?;
        info!(user_id = %user_id, recipe_id = %recipe_id, "Saved recipe");
        Ok(())
    }

    /// Remove a save, returning whether one existed
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn unsave(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<bool> {
        self.database.saves().unsave(user_id, recipe_id).await
    }

    /// IDs of recipes a user saved
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn saved_ids(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        self.database.saves().saved_recipe_ids(user_id).await
    }

    /// A user's saved recipes, newest save first
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid limit or a database failure
    pub async fn list_saved(&self, user_id: Uuid, limit: Option<i64>) -> AppResult<Vec<SavedRecipe>> {
        let limit = resolve_limit(
            limit,
            self.limits.default_result_limit,
            self.limits.max_result_limit,
        )?;
        self.database.saves().list_saved(user_id, limit).await
    }

    /// How many users saved a recipe
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown recipe
    pub async fn save_count(&self, recipe_id: Uuid) -> AppResult<SaveCount> {
        let title = self.recipe_title(recipe_id).await?;
        let save_count = self.database.saves().count(recipe_id).await?;
        Ok(SaveCount {
            recipe_id,
            title,
            save_count,
        })
    }

    /// Comment on a recipe
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for blank text and `RESOURCE_NOT_FOUND` for an
    /// unknown recipe
    pub async fn add_comment(&self, user_id: Uuid, recipe_id: Uuid, text: &str) -> AppResult<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::invalid_input("Comment text must not be empty"));
        }
        self.recipe_title(recipe_id).await?;

        let comment = Comment {
            id: Uuid::new_v4(),
            recipe_id,
            user_id,
            text: text.to_owned(),
            created_at: Utc::now(),
        };
        self.database.comments().add(&comment).await?;
        Ok(comment)
    }

    /// Comments on a recipe, newest first
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown recipe
    pub async fn list_comments(
        &self,
        recipe_id: Uuid,
        limit: Option<i64>,
    ) -> AppResult<RecipeComments> {
        let limit = resolve_limit(limit, self.limits.comment_limit, self.limits.max_result_limit)?;
        let title = self.recipe_title(recipe_id).await?;
        let comments: Vec<CommentView> = self
            .database
            .comments()
            .list_for_recipe(recipe_id, limit)
            .await?;

        Ok(RecipeComments {
            recipe_id,
            title,
            comments,
        })
    }
}
