// ABOUTME: Centralized resource container shared by route handlers and the CLI
// ABOUTME: Holds the database, ingredient catalog, auth manager, config and services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

//! # Server Resources
//!
//! Built once at startup and handed to the router behind an `Arc`.

use crate::auth::{AuthManager, LoginThrottle};
use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::AppResult;
use crate::services::{AccountService, RecipeService, SocialService};
use recepti_matching::IngredientCatalog;
use std::sync::Arc;
use tracing::info;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Storage handle
    pub database: Database,
    /// Synonyms and allergen rules
    pub catalog: Arc<IngredientCatalog>,
    /// Token issuer
    pub auth_manager: Arc<AuthManager>,
    /// Configuration the resources were built from
    pub config: Arc<ServerConfig>,
    /// Registration, login and token checks
    pub accounts: AccountService,
    /// Recipe creation, listing, search and pantry ranking
    pub recipes: RecipeService,
    /// Saves and comments
    pub social: SocialService,
}

impl ServerResources {
    /// Wire services over an opened database and a loaded catalog
    #[must_use]
    pub fn new(database: Database, catalog: IngredientCatalog, config: ServerConfig) -> Self {
        let catalog = Arc::new(catalog);
        let auth_manager = AuthManager::from_config(&config.auth);
        let throttle = LoginThrottle::from_config(&config.auth);

        let accounts = AccountService::new(
            database.clone(),
            auth_manager.clone(),
            throttle,
            config.auth.min_password_length,
        );
        let recipes = RecipeService::new(database.clone(), catalog.clone(), config.limits);
        let social = SocialService::new(database.clone(), config.limits);

        Self {
            database,
            catalog,
            auth_manager: Arc::new(auth_manager),
            config: Arc::new(config),
            accounts,
            recipes,
            social,
        }
    }

    /// Open the configured database and catalog, then wire services
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the catalog file
    /// is invalid
    pub async fn from_config(config: ServerConfig) -> AppResult<Self> {
        let database = Database::new(&config.database).await?;
        let catalog = load_catalog(&config)?;
        Ok(Self::new(database, catalog, config))
    }
}

/// Catalog from `RECEPTI_CATALOG_PATH` when set, built-in tables otherwise
///
/// # Errors
///
/// Returns `CONFIG_INVALID` if the catalog file cannot be read or parsed
pub fn load_catalog(config: &ServerConfig) -> AppResult<IngredientCatalog> {
    let catalog = match &config.catalog_path {
        Some(path) => IngredientCatalog::from_file(path)?,
        None => IngredientCatalog::builtin(),
    };
    info!(
        synonyms = catalog.synonyms().len(),
        allergen_categories = catalog.allergens().len(),
        "Ingredient catalog ready"
    );
    Ok(catalog)
}
