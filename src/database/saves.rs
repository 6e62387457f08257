// ABOUTME: Saved recipe (favorites) storage
// ABOUTME: One save per user and recipe, listed newest first with recipe and author data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use super::{count_to_u32, parse_string_list, parse_timestamp, parse_uuid, Database};
use crate::errors::{is_unique_violation, AppError, AppResult};
use crate::models::{timestamp, SavedRecipe};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_saves(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS saves (
                user_id TEXT NOT NULL,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                UNIQUE (user_id, recipe_id)
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create saves table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_saves_recipe ON saves(recipe_id)")
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to create saves index: {e}")))?;
        Ok(())
    }
}

/// Saves table operations
pub struct SavesManager {
    pool: SqlitePool,
}

impl SavesManager {
    /// Create a new saves manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Save a recipe for a user
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` if the user already saved it, or a
    /// database error
    pub async fn save(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<()> {
        sqlx::query("INSERT INTO saves (user_id, recipe_id, created_at) VALUES ($1, $2, $3)")
            .bind(user_id.to_string())
            .bind(recipe_id.to_string())
            .bind(timestamp::format(&Utc::now()))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::already_exists("Recipe is already saved")
                        .with_resource_id(recipe_id.to_string())
                } else {
                    AppError::database(format!("Failed to save recipe: {e}"))
                }
            })?;
        Ok(())
    }

    /// Remove a save, returning whether one existed
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn unsave(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM saves WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id.to_string())
            .bind(recipe_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to unsave recipe: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// IDs of every recipe a user saved
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn saved_recipe_ids(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        let rows = sqlx::query("SELECT recipe_id FROM saves WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list saved recipe ids: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("recipe_id");
                parse_uuid(&id)
            })
            .collect()
    }

    /// Saved recipes joined with recipe and author data, newest save first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_saved(&self, user_id: Uuid, limit: u32) -> AppResult<Vec<SavedRecipe>> {
        let rows = sqlx::query(
            r"
            SELECT s.recipe_id, s.created_at AS saved_at,
                   r.title, r.allergens, r.ingredient_keys,
                   u.username AS author_username
            FROM saves s
            JOIN recipes r ON r.id = s.recipe_id
            LEFT JOIN users u ON u.id = r.author_id
            WHERE s.user_id = $1
            ORDER BY s.created_at DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list saved recipes: {e}")))?;

        rows.iter().map(row_to_saved).collect()
    }

    /// Number of users who saved a recipe
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn count(&self, recipe_id: Uuid) -> AppResult<u32> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM saves WHERE recipe_id = $1")
            .bind(recipe_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count saves: {e}")))?;

        Ok(count_to_u32(count))
    }
}

fn row_to_saved(row: &SqliteRow) -> AppResult<SavedRecipe> {
    let recipe_id_str: String = row.get("recipe_id");
    let saved_at_str: String = row.get("saved_at");
    let keys_json: String = row.get("ingredient_keys");
    let allergens_json: String = row.get("allergens");

    Ok(SavedRecipe {
        recipe_id: parse_uuid(&recipe_id_str)?,
        title: row.get("title"),
        author_username: row.get("author_username"),
        allergens: parse_string_list(&allergens_json)?,
        ingredient_keys: parse_string_list(&keys_json)?,
        saved_at: parse_timestamp(&saved_at_str)?,
    })
}
