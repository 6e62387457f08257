// ABOUTME: Account registration, login with throttling, and bearer token authentication
// ABOUTME: Unknown users and wrong passwords are indistinguishable to the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use crate::auth::{hash_password, verify_password, AuthManager, LoginThrottle};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{LoginRequest, PublicUser, RegisterRequest, User};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// User plus a freshly issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// The authenticated user
    pub user: PublicUser,
    /// Bearer token
    pub token: String,
    /// Token lifetime in hours
    pub expires_in_hours: i64,
}

/// Account operations
#[derive(Clone)]
pub struct AccountService {
    database: Database,
    auth: AuthManager,
    throttle: LoginThrottle,
    min_password_length: usize,
}

impl AccountService {
    /// Create the account service
    #[must_use]
    pub const fn new(
        database: Database,
        auth: AuthManager,
        throttle: LoginThrottle,
        min_password_length: usize,
    ) -> Self {
        Self {
            database,
            auth,
            throttle,
            min_password_length,
        }
    }

    /// Register a new account and issue a token
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for a blank username or short password,
    /// `RESOURCE_ALREADY_EXISTS` if the username is taken
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<AuthSession> {
        let username = request.username.trim();
        if username.is_empty() {
            return Err(AppError::invalid_input("Username must not be empty"));
        }
        if request.password.chars().count() < self.min_password_length {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {} characters",
                self.min_password_length
            )));
        }

        let display_name = request
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(username)
            .to_owned();
        let bio = request
            .bio
            .as_deref()
            .map(str::trim)
            .filter(|bio| !bio.is_empty())
            .map(str::to_owned);

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_owned(),
            display_name,
            password_hash: hash_password(&request.password).await?,
            bio,
            created_at: Utc::now(),
        };

        self.database.users().create(&user).await?;
        AppLogger::log_auth_event(&user.username, "register", true, None);
        info!(user_id = %user.id, "Registered new user");

        self.session_for(&user)
    }

    /// Verify credentials and issue a token
    ///
    /// # Errors
    ///
    /// Returns `RATE_LIMIT_EXCEEDED` while the username is locked out and
    /// `AUTH_INVALID` for unknown users or wrong passwords
    pub async fn login(&self, request: &LoginRequest) -> AppResult<AuthSession> {
        let username = request.username.trim();
        let attempt = self.throttle.begin_attempt(username)?;

        let user = self.database.users().get_by_username(username).await?;
        let verified = match &user {
            Some(user) => verify_password(&request.password, &user.password_hash).await,
            None => false,
        };

        match user {
            Some(user) if verified => {
                self.throttle.reset(username);
                AppLogger::log_auth_event(username, "login", true, None);
                self.session_for(&user)
            }
            _ => {
                AppLogger::log_auth_event(
                    username,
                    "login",
                    false,
                    Some(&format!("failed attempt {attempt}")),
                );
                Err(AppError::auth_invalid("Invalid username or password"))
            }
        }
    }

    /// Resolve a bearer token to its user
    ///
    /// # Errors
    ///
    /// Returns `AUTH_EXPIRED` or `AUTH_INVALID` for bad tokens and
    /// `AUTH_INVALID` when the user no longer exists
    pub async fn authenticate(&self, token: &str) -> AppResult<User> {
        let claims = self.auth.validate_token(token)?;
        let user_id = claims.user_id()?;

        self.database
            .users()
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::auth_invalid("Token refers to an unknown user"))
    }

    /// Look up a user by username
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn find_user(&self, username: &str) -> AppResult<Option<User>> {
        self.database.users().get_by_username(username.trim()).await
    }

    fn session_for(&self, user: &User) -> AppResult<AuthSession> {
        Ok(AuthSession {
            user: PublicUser::from(user),
            token: self.auth.generate_token(user)?,
            expires_in_hours: self.auth.token_expiry_hours(),
        })
    }
}
