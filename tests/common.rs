// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory database, server resources, user and recipe helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]
//! Shared test utilities for `recepti_server`

use anyhow::Result;
use chrono::Utc;
use recepti_matching::{IngredientCatalog, RecipeComposition};
use recepti_server::{
    config::ServerConfig,
    database::Database,
    models::{CreateRecipeRequest, IngredientInput, Recipe, RegisterRequest, User},
    resources::ServerResources,
    services::AuthSession,
};
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Password used for every test account
pub const TEST_PASSWORD: &str = "correct-horse";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::in_memory().await?)
}

/// Server resources over a fresh in-memory database and the built-in catalog
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(
        database,
        IngredientCatalog::builtin(),
        ServerConfig::for_testing(),
    )))
}

/// User row with a placeholder hash, for storage-level tests that never log in
pub fn test_user(username: &str) -> User {
    User {
        id: Uuid::new_v4(),
        username: username.to_owned(),
        display_name: username.to_owned(),
        password_hash: "not-a-real-hash".to_owned(),
        bio: None,
        created_at: Utc::now(),
    }
}

/// Insert a user row directly
pub async fn insert_user(database: &Database, username: &str) -> Result<User> {
    let user = test_user(username);
    database.users().create(&user).await?;
    Ok(user)
}

/// Build and insert a recipe the way the recipe service would
pub async fn insert_recipe(
    database: &Database,
    author: &User,
    title: &str,
    ingredients: &[&str],
) -> Result<Recipe> {
    let catalog = IngredientCatalog::builtin();
    let inputs: Vec<IngredientInput> = ingredients
        .iter()
        .map(|name| IngredientInput::named(*name))
        .collect();
    let composition = RecipeComposition::from_inputs(&catalog, &inputs)?;

    let recipe = Recipe {
        id: Uuid::new_v4(),
        author_id: author.id,
        title: title.to_owned(),
        description: String::new(),
        ingredients: composition.ingredients,
        ingredient_keys: composition.ingredient_keys,
        steps: vec!["Pripremi".to_owned()],
        allergens: composition.allergens,
        created_at: Utc::now(),
    };
    database.recipes().insert(&recipe).await?;
    Ok(recipe)
}

/// Register an account through the account service
pub async fn register_user(resources: &ServerResources, username: &str) -> Result<AuthSession> {
    Ok(resources
        .accounts
        .register(&RegisterRequest {
            username: username.to_owned(),
            password: TEST_PASSWORD.to_owned(),
            display_name: None,
            bio: None,
        })
        .await?)
}

/// Recipe creation request from plain ingredient names
pub fn recipe_request(title: &str, ingredients: &[&str]) -> CreateRecipeRequest {
    CreateRecipeRequest {
        title: title.to_owned(),
        description: None,
        ingredients: ingredients
            .iter()
            .map(|name| IngredientInput::named(*name))
            .collect(),
        steps: vec!["Pripremi".to_owned()],
    }
}
