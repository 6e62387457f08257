// ABOUTME: Saves (favorites) and comments attached to recipes
// ABOUTME: Read models joined with recipe and author data for listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recipe saved by a user, joined with recipe data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRecipe {
    /// Saved recipe ID
    pub recipe_id: Uuid,
    /// Recipe title
    pub title: String,
    /// Author username, absent when the author row is gone
    pub author_username: Option<String>,
    /// Recipe allergens
    pub allergens: Vec<String>,
    /// Recipe ingredient keys
    pub ingredient_keys: Vec<String>,
    /// When the user saved it
    pub saved_at: DateTime<Utc>,
}

/// Number of saves for one recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveCount {
    /// Recipe ID
    pub recipe_id: Uuid,
    /// Recipe title
    pub title: String,
    /// Number of users who saved it
    pub save_count: u32,
}

/// Stored comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Comment ID
    pub id: Uuid,
    /// Recipe commented on
    pub recipe_id: Uuid,
    /// Comment author
    pub user_id: Uuid,
    /// Trimmed, non-empty text
    pub text: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Comment joined with its author for listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    /// Comment ID
    pub id: Uuid,
    /// Comment text
    pub text: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Author username, absent when the author row is gone
    pub author_username: Option<String>,
}

/// Comments for one recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeComments {
    /// Recipe ID
    pub recipe_id: Uuid,
    /// Recipe title
    pub title: String,
    /// Newest first
    pub comments: Vec<CommentView>,
}
