// ABOUTME: Recipe comment storage
// ABOUTME: Comments are listed newest first with their author's username
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use super::{parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{timestamp, Comment, CommentView};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_comments(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS comments (
                id TEXT PRIMARY KEY,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                user_id TEXT NOT NULL,
                text TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create comments table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_comments_recipe ON comments(recipe_id, created_at)",
        )
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create comments index: {e}")))?;
        Ok(())
    }
}

/// Comments table operations
pub struct CommentsManager {
    pool: SqlitePool,
}

impl CommentsManager {
    /// Create a new comments manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a comment
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn add(&self, comment: &Comment) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO comments (id, recipe_id, user_id, text, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(comment.id.to_string())
        .bind(comment.recipe_id.to_string())
        .bind(comment.user_id.to_string())
        .bind(&comment.text)
        .bind(timestamp::format(&comment.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add comment: {e}")))?;
        Ok(())
    }

    /// Comments on a recipe, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_for_recipe(&self, recipe_id: Uuid, limit: u32) -> AppResult<Vec<CommentView>> {
        let rows = sqlx::query(
            r"
            SELECT c.id, c.text, c.created_at, u.username AS author_username
            FROM comments c
            LEFT JOIN users u ON u.id = c.user_id
            WHERE c.recipe_id = $1
            ORDER BY c.created_at DESC, c.id ASC
            LIMIT $2
            ",
        )
        .bind(recipe_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list comments: {e}")))?;

        rows.iter().map(row_to_comment_view).collect()
    }
}

fn row_to_comment_view(row: &SqliteRow) -> AppResult<CommentView> {
    let id_str: String = row.get("id");
    let created_at_str: String = row.get("created_at");

    Ok(CommentView {
        id: parse_uuid(&id_str)?,
        text: row.get("text"),
        created_at: parse_timestamp(&created_at_str)?,
        author_username: row.get("author_username"),
    })
}
