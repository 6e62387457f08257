// ABOUTME: Integration tests for custom ingredient catalogs flowing through the services
// ABOUTME: A YAML catalog replaces the built-in synonyms and allergen rules at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{create_test_database, recipe_request, register_user};
use recepti_server::{
    config::ServerConfig,
    errors::ErrorCode,
    resources::{load_catalog, ServerResources},
    services::recipes::SearchParams,
};

const CATALOG: &str = r"
synonyms:
  kukuruz secerac: kukuruz
  celerov korijen: celer
allergens:
  celer: [celer]
  gluten: [brasno, kruh]
";

#[tokio::test]
async fn test_yaml_catalog_drives_keys_and_allergens() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("catalog.yaml");
    std::fs::write(&path, CATALOG)?;

    let mut config = ServerConfig::for_testing();
    config.catalog_path = Some(path);
    let catalog = load_catalog(&config)?;

    let resources = ServerResources::new(create_test_database().await?, catalog, config);
    let ana = register_user(&resources, "ana").await?;

    let recipe = resources
        .recipes
        .create(
            ana.user.id,
            &recipe_request("Juha", &["Celerov korijen", "Kukuruz šećerac", "Mlijeko"]),
        )
        .await?;
    assert_eq!(recipe.ingredient_keys, vec!["celer", "kukuruz", "mlijeko"]);
    // Built-in dairy rule is replaced by the file
    assert_eq!(recipe.allergens, vec!["celer"]);

    let found = resources
        .recipes
        .search(&SearchParams {
            include: "Kukuruz šećerac".to_owned(),
            exclude_allergens: "gluten".to_owned(),
            ..SearchParams::default()
        })
        .await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, recipe.id);
    Ok(())
}

#[test]
fn test_missing_catalog_file_is_config_error() {
    let mut config = ServerConfig::for_testing();
    config.catalog_path = Some("/nonexistent/recepti/catalog.yaml".into());

    let err = load_catalog(&config).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}

#[test]
fn test_builtin_catalog_without_path() {
    let catalog = load_catalog(&ServerConfig::for_testing()).unwrap();
    assert_eq!(catalog.canonical_key("Paradajz"), "rajcica");
    assert!(catalog.allergens().contains_category("gluten"));
}
