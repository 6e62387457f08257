// ABOUTME: User account model and its public projection
// ABOUTME: Password hashes never leave the server through PublicUser
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,
    /// Unique login name
    pub username: String,
    /// Name shown next to recipes and comments
    pub display_name: String,
    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Optional profile text
    pub bio: Option<String>,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

/// User fields safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    /// User ID
    pub id: Uuid,
    /// Login name
    pub username: String,
    /// Display name
    pub display_name: String,
    /// Profile text
    pub bio: Option<String>,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            bio: user.bio.clone(),
            created_at: user.created_at,
        }
    }
}

/// Request to register a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Login name
    pub username: String,
    /// Plain-text password
    pub password: String,
    /// Optional display name, defaults to the username
    #[serde(default)]
    pub display_name: Option<String>,
    /// Optional profile text
    #[serde(default)]
    pub bio: Option<String>,
}

/// Request to log in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login name
    pub username: String,
    /// Plain-text password
    pub password: String,
}
