// ABOUTME: Integration tests for the account, recipe and social services
// ABOUTME: Registration rules, login throttling, recipe creation, search, pantry ranking and saves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{create_test_resources, recipe_request, register_user, TEST_PASSWORD};
use recepti_server::{
    errors::ErrorCode,
    models::{LoginRequest, RegisterRequest},
    services::recipes::{PantryParams, SearchParams},
};
use uuid::Uuid;

fn login(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn test_register_login_and_authenticate() -> Result<()> {
    let resources = create_test_resources().await?;

    let session = register_user(&resources, "  ana ").await?;
    assert_eq!(session.user.username, "ana");
    assert_eq!(session.user.display_name, "ana");
    assert_eq!(session.expires_in_hours, resources.config.auth.jwt_expiry_hours);

    let user = resources.accounts.authenticate(&session.token).await?;
    assert_eq!(user.id, session.user.id);

    let again = resources.accounts.login(&login("ana", TEST_PASSWORD)).await?;
    assert_eq!(again.user.id, session.user.id);
    Ok(())
}

#[tokio::test]
async fn test_registration_rules() -> Result<()> {
    let resources = create_test_resources().await?;
    register_user(&resources, "ana").await?;

    let err = register_user(&resources, "ana").await.unwrap_err();
    let err = err.downcast::<recepti_server::errors::AppError>()?;
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    let short = resources
        .accounts
        .register(&RegisterRequest {
            username: "ivan".to_owned(),
            password: "kratko".to_owned(),
            display_name: None,
            bio: None,
        })
        .await
        .unwrap_err();
    assert_eq!(short.code, ErrorCode::InvalidInput);

    let blank = resources
        .accounts
        .register(&RegisterRequest {
            username: "   ".to_owned(),
            password: TEST_PASSWORD.to_owned(),
            display_name: None,
            bio: None,
        })
        .await
        .unwrap_err();
    assert_eq!(blank.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_login_locks_out_after_repeated_failures() -> Result<()> {
    let resources = create_test_resources().await?;
    register_user(&resources, "ana").await?;

    let max_attempts = resources.config.auth.max_login_attempts;
    for _ in 0..max_attempts {
        let err = resources
            .accounts
            .login(&login("ana", "pogresna-lozinka"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthInvalid);
    }

    // Locked even with the right password
    let err = resources
        .accounts
        .login(&login("ana", TEST_PASSWORD))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RateLimitExceeded);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_wrong_passwords_cannot_outrun_lockout() -> Result<()> {
    let resources = create_test_resources().await?;
    register_user(&resources, "ana").await?;
    let max_attempts = resources.config.auth.max_login_attempts as usize;

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..10 {
        let resources = resources.clone();
        tasks.spawn(async move {
            resources
                .accounts
                .login(&login("ana", "pogresna-lozinka"))
                .await
                .unwrap_err()
                .code
        });
    }

    let mut codes = Vec::new();
    while let Some(code) = tasks.join_next().await {
        codes.push(code?);
    }

    let invalid = codes.iter().filter(|c| **c == ErrorCode::AuthInvalid).count();
    let limited = codes
        .iter()
        .filter(|c| **c == ErrorCode::RateLimitExceeded)
        .count();
    assert_eq!(invalid, max_attempts);
    assert_eq!(limited, 10 - max_attempts);

    let err = resources
        .accounts
        .login(&login("ana", TEST_PASSWORD))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RateLimitExceeded);
    Ok(())
}

#[tokio::test]
async fn test_successful_login_releases_attempts() -> Result<()> {
    let resources = create_test_resources().await?;
    register_user(&resources, "ana").await?;
    let max_attempts = resources.config.auth.max_login_attempts;

    for _ in 1..max_attempts {
        resources
            .accounts
            .login(&login("ana", "pogresna-lozinka"))
            .await
            .unwrap_err();
    }
    resources.accounts.login(&login("ana", TEST_PASSWORD)).await?;

    // Full budget is available again
    for _ in 0..max_attempts {
        let err = resources
            .accounts
            .login(&login("ana", "pogresna-lozinka"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthInvalid);
    }
    Ok(())
}

#[tokio::test]
async fn test_unknown_user_login_is_invalid() -> Result<()> {
    let resources = create_test_resources().await?;
    let err = resources
        .accounts
        .login(&login("nitko", TEST_PASSWORD))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthInvalid);
    Ok(())
}

#[tokio::test]
async fn test_create_recipe_derives_keys_and_allergens() -> Result<()> {
    let resources = create_test_resources().await?;
    let ana = register_user(&resources, "ana").await?;

    let recipe = resources
        .recipes
        .create(
            ana.user.id,
            &recipe_request("Piletina s rižom", &["Piletina", "Riža", "Luk", "  "]),
        )
        .await?;
    assert_eq!(recipe.ingredient_keys, vec!["luk", "piletina", "riza"]);
    assert!(recipe.allergens.is_empty());
    assert_eq!(recipe.ingredients.len(), 3);

    let fetched = resources.recipes.get(recipe.id).await?;
    assert_eq!(fetched.title, "Piletina s rižom");

    let blank_title = resources
        .recipes
        .create(ana.user.id, &recipe_request("  ", &["Luk"]))
        .await
        .unwrap_err();
    assert_eq!(blank_title.code, ErrorCode::InvalidInput);

    let no_ingredients = resources
        .recipes
        .create(ana.user.id, &recipe_request("Prazno", &[" ", ""]))
        .await
        .unwrap_err();
    assert_eq!(no_ingredients.code, ErrorCode::InvalidInput);

    let missing = resources.recipes.get(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(missing.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_search_excludes_allergen_even_when_included() -> Result<()> {
    let resources = create_test_resources().await?;
    let ana = register_user(&resources, "ana").await?;

    let porridge = resources
        .recipes
        .create(ana.user.id, &recipe_request("Zobena kaša", &["Zobene pahuljice", "Mlijeko", "Banana"]))
        .await?;
    let smoothie = resources
        .recipes
        .create(ana.user.id, &recipe_request("Smoothie", &["Banana", "Jabuka"]))
        .await?;

    let with_banana = resources
        .recipes
        .search(&SearchParams {
            include: "banana".to_owned(),
            ..SearchParams::default()
        })
        .await?;
    assert_eq!(with_banana.len(), 2);

    let dairy_free = resources
        .recipes
        .search(&SearchParams {
            include: "banana".to_owned(),
            exclude_allergens: "mlijeko".to_owned(),
            ..SearchParams::default()
        })
        .await?;
    let ids: Vec<Uuid> = dairy_free.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![smoothie.id]);
    assert!(!ids.contains(&porridge.id));
    Ok(())
}

#[tokio::test]
async fn test_pantry_min_match_drops_weak_overlap() -> Result<()> {
    let resources = create_test_resources().await?;
    let ana = register_user(&resources, "ana").await?;

    let a = resources
        .recipes
        .create(ana.user.id, &recipe_request("A", &["Luk", "Piletina", "Riža"]))
        .await?;
    resources
        .recipes
        .create(ana.user.id, &recipe_request("B", &["Luk"]))
        .await?;

    let ranked = resources
        .recipes
        .pantry(&PantryParams {
            pantry: "piletina, luk".to_owned(),
            min_match: Some(2),
            ..PantryParams::default()
        })
        .await?;

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].recipe.id, a.id);
    assert_eq!(ranked[0].match_count, 2);
    assert_eq!(ranked[0].match_keys, vec!["luk", "piletina"]);

    let default_min = resources
        .recipes
        .pantry(&PantryParams {
            pantry: "piletina, luk".to_owned(),
            ..PantryParams::default()
        })
        .await?;
    assert_eq!(default_min.len(), 2);
    assert_eq!(default_min[0].recipe.id, a.id);
    Ok(())
}

#[tokio::test]
async fn test_pantry_rejects_bad_input() -> Result<()> {
    let resources = create_test_resources().await?;

    let empty = resources
        .recipes
        .pantry(&PantryParams {
            pantry: " , ,".to_owned(),
            ..PantryParams::default()
        })
        .await
        .unwrap_err();
    assert_eq!(empty.code, ErrorCode::InvalidInput);

    let zero_min = resources
        .recipes
        .pantry(&PantryParams {
            pantry: "luk".to_owned(),
            min_match: Some(0),
            ..PantryParams::default()
        })
        .await
        .unwrap_err();
    assert_eq!(zero_min.code, ErrorCode::InvalidInput);

    let huge_limit = resources
        .recipes
        .pantry(&PantryParams {
            pantry: "luk".to_owned(),
            limit: Some(10_000),
            ..PantryParams::default()
        })
        .await
        .unwrap_err();
    assert_eq!(huge_limit.code, ErrorCode::ValueOutOfRange);
    Ok(())
}

#[tokio::test]
async fn test_list_all_by_unknown_username_is_empty() -> Result<()> {
    let resources = create_test_resources().await?;
    let ana = register_user(&resources, "ana").await?;
    resources
        .recipes
        .create(ana.user.id, &recipe_request("Juha", &["Luk"]))
        .await?;

    assert_eq!(resources.recipes.list_all(None, None).await?.len(), 1);
    assert_eq!(resources.recipes.list_all(Some("ana"), None).await?.len(), 1);
    assert!(resources.recipes.list_all(Some("nitko"), None).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_saves_and_comments_flow() -> Result<()> {
    let resources = create_test_resources().await?;
    let ana = register_user(&resources, "ana").await?;
    let recipe = resources
        .recipes
        .create(ana.user.id, &recipe_request("Juha", &["Luk"]))
        .await?;

    resources.social.save(ana.user.id, recipe.id).await?;
    let duplicate = resources.social.save(ana.user.id, recipe.id).await.unwrap_err();
    assert_eq!(duplicate.code, ErrorCode::ResourceAlreadyExists);

    let unknown = resources
        .social
        .save(ana.user.id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(unknown.code, ErrorCode::ResourceNotFound);

    let count = resources.social.save_count(recipe.id).await?;
    assert_eq!(count.save_count, 1);
    assert_eq!(count.title, "Juha");
    assert_eq!(resources.social.saved_ids(ana.user.id).await?, vec![recipe.id]);

    let comment = resources
        .social
        .add_comment(ana.user.id, recipe.id, "  Fino!  ")
        .await?;
    assert_eq!(comment.text, "Fino!");
    let blank = resources
        .social
        .add_comment(ana.user.id, recipe.id, "   ")
        .await
        .unwrap_err();
    assert_eq!(blank.code, ErrorCode::InvalidInput);

    let listed = resources.social.list_comments(recipe.id, None).await?;
    assert_eq!(listed.comments.len(), 1);
    assert_eq!(listed.comments[0].author_username.as_deref(), Some("ana"));

    assert!(resources.social.unsave(ana.user.id, recipe.id).await?);
    assert!(resources.social.list_saved(ana.user.id, None).await?.is_empty());
    Ok(())
}
