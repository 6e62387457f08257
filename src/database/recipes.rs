// ABOUTME: Recipe storage with enriched listing, ingredient search and pantry candidate queries
// ABOUTME: Enrichment joins the author and counts saves and comments per recipe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use super::filter_sql::SqlFilter;
use super::{count_to_u32, parse_string_list, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{timestamp, IngredientEntry, Recipe, RecipeSummary};
use recepti_matching::{IngredientFilter, PantryQuery};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

/// Enriched projection shared by every listing query
const SUMMARY_SELECT: &str = r"
    SELECT r.id, r.title, r.ingredient_keys, r.allergens, r.created_at,
           u.username AS author_username,
           u.display_name AS author_display_name,
           (SELECT COUNT(*) FROM saves s WHERE s.recipe_id = r.id) AS save_count,
           (SELECT COUNT(*) FROM comments c WHERE c.recipe_id = r.id) AS comment_count
    FROM recipes r
    LEFT JOIN users u ON u.id = r.author_id
";

impl Database {
    pub(super) async fn migrate_recipes(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                author_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                ingredients TEXT NOT NULL,
                ingredient_keys TEXT NOT NULL,
                steps TEXT NOT NULL,
                allergens TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipes table: {e}")))?;

        for statement in [
            "CREATE INDEX IF NOT EXISTS idx_recipes_author ON recipes(author_id)",
            "CREATE INDEX IF NOT EXISTS idx_recipes_created_at ON recipes(created_at)",
        ] {
            sqlx::query(statement)
                .execute(self.pool())
                .await
                .map_err(|e| AppError::database(format!("Failed to create recipes index: {e}")))?;
        }
        Ok(())
    }
}

/// Recipes table operations
pub struct RecipesManager {
    pool: SqlitePool,
}

impl RecipesManager {
    /// Create a new recipes manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a recipe
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails
    pub async fn insert(&self, recipe: &Recipe) -> AppResult<()> {
        let ingredients_json = serde_json::to_string(&recipe.ingredients)?;
        let keys_json = serde_json::to_string(&recipe.ingredient_keys)?;
        let steps_json = serde_json::to_string(&recipe.steps)?;
        let allergens_json = serde_json::to_string(&recipe.allergens)?;

        sqlx::query(
            r"
            INSERT INTO recipes (
                id, author_id, title, description, ingredients,
                ingredient_keys, steps, allergens, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(recipe.id.to_string())
        .bind(recipe.author_id.to_string())
        .bind(&recipe.title)
        .bind(&recipe.description)
        .bind(&ingredients_json)
        .bind(&keys_json)
        .bind(&steps_json)
        .bind(&allergens_json)
        .bind(timestamp::format(&recipe.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?;

        Ok(())
    }

    /// Get a full recipe by ID
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, recipe_id: Uuid) -> AppResult<Option<Recipe>> {
        let row = sqlx::query(
            r"
            SELECT id, author_id, title, description, ingredients,
                   ingredient_keys, steps, allergens, created_at
            FROM recipes
            WHERE id = $1
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        row.map(|r| row_to_recipe(&r)).transpose()
    }

    /// Title of a recipe, `None` when it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn title(&self, recipe_id: Uuid) -> AppResult<Option<String>> {
        let row = sqlx::query("SELECT title FROM recipes WHERE id = $1")
            .bind(recipe_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up recipe: {e}")))?;

        Ok(row.map(|r| r.get("title")))
    }

    /// Full recipes by one author, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_by_author(&self, author_id: Uuid, limit: u32) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query(
            r"
            SELECT id, author_id, title, description, ingredients,
                   ingredient_keys, steps, allergens, created_at
            FROM recipes
            WHERE author_id = $1
            ORDER BY created_at DESC, id ASC
            LIMIT $2
            ",
        )
        .bind(author_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list recipes by author: {e}")))?;

        rows.iter().map(row_to_recipe).collect()
    }

    /// Enriched recipes, newest first, optionally restricted to one author
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_enriched(
        &self,
        author_id: Option<Uuid>,
        limit: u32,
    ) -> AppResult<Vec<RecipeSummary>> {
        let mut sql = SqlFilter::default();
        if let Some(author_id) = author_id {
            sql.push_author(&author_id.to_string());
        }
        self.fetch_summaries(&sql, Some(limit)).await
    }

    /// Enriched recipes matching an ingredient filter, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn search(
        &self,
        filter: &IngredientFilter,
        limit: u32,
    ) -> AppResult<Vec<RecipeSummary>> {
        self.fetch_summaries(&SqlFilter::from_filter(filter), Some(limit))
            .await
    }

    /// Enriched candidates for pantry ranking
    ///
    /// Applies the allergen exclusion and skips recipes sharing no key with
    /// the pantry. Not limited: the ranker sorts and truncates.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn pantry_candidates(&self, query: &PantryQuery) -> AppResult<Vec<RecipeSummary>> {
        self.fetch_summaries(&SqlFilter::for_pantry(query), None)
            .await
    }

    async fn fetch_summaries(
        &self,
        filter: &SqlFilter,
        limit: Option<u32>,
    ) -> AppResult<Vec<RecipeSummary>> {
        let limit_clause = if limit.is_some() { "LIMIT ?" } else { "" };
        let query = format!(
            "{SUMMARY_SELECT} {} ORDER BY r.created_at DESC, r.id ASC {limit_clause}",
            filter.where_clause()
        );

        let mut statement = sqlx::query(&query);
        for param in filter.params() {
            statement = statement.bind(param);
        }
        if let Some(limit) = limit {
            statement = statement.bind(i64::from(limit));
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to query recipes: {e}")))?;

        debug!(rows = rows.len(), "Fetched enriched recipes");
        rows.iter().map(row_to_summary).collect()
    }
}

fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
    let id_str: String = row.get("id");
    let author_id_str: String = row.get("author_id");
    let ingredients_json: String = row.get("ingredients");
    let keys_json: String = row.get("ingredient_keys");
    let steps_json: String = row.get("steps");
    let allergens_json: String = row.get("allergens");
    let created_at_str: String = row.get("created_at");

    let ingredients: Vec<IngredientEntry> = serde_json::from_str(&ingredients_json)?;

    Ok(Recipe {
        id: parse_uuid(&id_str)?,
        author_id: parse_uuid(&author_id_str)?,
        title: row.get("title"),
        description: row.get("description"),
        ingredients,
        ingredient_keys: parse_string_list(&keys_json)?,
        steps: parse_string_list(&steps_json)?,
        allergens: parse_string_list(&allergens_json)?,
        created_at: parse_timestamp(&created_at_str)?,
    })
}

fn row_to_summary(row: &SqliteRow) -> AppResult<RecipeSummary> {
    let id_str: String = row.get("id");
    let keys_json: String = row.get("ingredient_keys");
    let allergens_json: String = row.get("allergens");
    let created_at_str: String = row.get("created_at");
    let save_count: i64 = row.get("save_count");
    let comment_count: i64 = row.get("comment_count");

    Ok(RecipeSummary {
        id: parse_uuid(&id_str)?,
        title: row.get("title"),
        ingredient_keys: parse_string_list(&keys_json)?,
        allergens: parse_string_list(&allergens_json)?,
        created_at: parse_timestamp(&created_at_str)?,
        author_username: row.get("author_username"),
        author_display_name: row.get("author_display_name"),
        save_count: count_to_u32(save_count),
        comment_count: count_to_u32(comment_count),
    })
}
