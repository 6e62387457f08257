// ABOUTME: SQLite storage for users, recipes, saves and comments
// ABOUTME: Owns the connection pool, runs schema migrations and hands out per-table managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

//! # Database Management
//!
//! List-valued recipe fields (ingredients, keys, steps, allergens) are stored
//! as JSON text and queried with `json_each`. Timestamps are fixed-width
//! RFC 3339 strings so `ORDER BY created_at` is chronological.

mod comments;
mod filter_sql;
mod recipes;
mod saves;
mod users;

pub use comments::CommentsManager;
pub use filter_sql::SqlFilter;
pub use recipes::RecipesManager;
pub use saves::SavesManager;
pub use users::UsersManager;

use crate::config::{DatabaseConfig, DatabaseUrl};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

/// Database handle shared by all services
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url.to_connection_string())
            .map_err(|e| AppError::config(format!("Invalid database URL {}: {e}", config.url)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if config.url.is_memory() {
            // Every connection to :memory: is a separate database, keep exactly one alive
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            if let DatabaseUrl::SQLite { path } = &config.url {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        AppError::config(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
            }
            SqlitePoolOptions::new().max_connections(config.max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to {}: {e}", config.url)))?;

        let db = Self { pool };
        db.migrate().await?;

        info!(database = %config.url, "Database ready");
        Ok(db)
    }

    /// In-memory database with migrations applied
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn in_memory() -> AppResult<Self> {
        Self::new(&DatabaseConfig::memory()).await
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        let started = Instant::now();

        self.migrate_users().await?;
        self.migrate_recipes().await?;
        self.migrate_saves().await?;
        self.migrate_comments().await?;

        AppLogger::log_database_operation(
            "migrate",
            "all",
            true,
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        Ok(())
    }

    /// Check connectivity with a trivial query
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not answer
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// Users table
    #[must_use]
    pub fn users(&self) -> UsersManager {
        UsersManager::new(self.pool.clone())
    }

    /// Recipes table
    #[must_use]
    pub fn recipes(&self) -> RecipesManager {
        RecipesManager::new(self.pool.clone())
    }

    /// Saves table
    #[must_use]
    pub fn saves(&self) -> SavesManager {
        SavesManager::new(self.pool.clone())
    }

    /// Comments table
    #[must_use]
    pub fn comments(&self) -> CommentsManager {
        CommentsManager::new(self.pool.clone())
    }
}

/// Parse a stored UUID column
pub(crate) fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::internal(format!("Invalid UUID '{value}': {e}")))
}

/// Parse a stored timestamp column
pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    crate::models::timestamp::parse(value)
}

/// Parse a stored JSON string array column
pub(crate) fn parse_string_list(value: &str) -> AppResult<Vec<String>> {
    Ok(serde_json::from_str(value)?)
}

/// Convert a SQL `COUNT(*)` into a counter
pub(crate) fn count_to_u32(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
