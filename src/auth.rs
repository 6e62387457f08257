// ABOUTME: JWT issuing and validation, bcrypt password hashing and per-username login throttling
// ABOUTME: HS256 tokens signed with the configured secret; lockout state kept in a DashMap
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

//! # Authentication
//!
//! Tokens are HS256 JWTs carrying the user id and username. Password hashing
//! is CPU bound and runs on the blocking pool.

use crate::config::AuthConfig;
use crate::constants::auth::{JWT_ISSUER, THROTTLE_CLEANUP_THRESHOLD};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::User;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

/// `JWT` claims for user authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// Username at issue time
    pub username: String,
    /// Issuer
    pub iss: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// User id carried in the subject claim
    ///
    /// # Errors
    ///
    /// Returns `AUTH_INVALID` if the subject is not a UUID
    pub fn user_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::auth_invalid("Token subject is not a valid user id"))
    }
}

/// Issues and validates session tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create an authentication manager from a shared secret
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_hours,
        }
    }

    /// Create from the auth section of the server config
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.jwt_secret.as_bytes(), config.jwt_expiry_hours)
    }

    /// Token lifetime in hours
    #[must_use]
    pub const fn token_expiry_hours(&self) -> i64 {
        self.token_expiry_hours
    }

    /// Generate a `JWT` token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            iss: JWT_ISSUER.to_owned(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    ///
    /// Returns `AUTH_EXPIRED` for an expired token and `AUTH_INVALID` for
    /// anything else that fails validation
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_issuer(&[JWT_ISSUER]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            debug!("JWT validation failed: {e}");
            match e.kind() {
                ErrorKind::ExpiredSignature => AppError::auth_expired(),
                ErrorKind::InvalidSignature => {
                    AppError::auth_invalid("Token signature verification failed")
                }
                _ => AppError::auth_invalid(format!("Token validation failed: {e}")),
            }
        })?;

        Ok(data.claims)
    }
}

/// Hash a password with bcrypt on the blocking pool
///
/// # Errors
///
/// Returns an error if hashing fails or the blocking task panics
pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Verify password against hash using bcrypt with `spawn_blocking`
///
/// A malformed hash counts as a mismatch.
pub async fn verify_password(password: &str, hash: &str) -> bool {
    let password = password.to_owned();
    let hash = hash.to_owned();

    tokio::task::spawn_blocking(move || bcrypt::verify(&password, &hash).unwrap_or(false))
        .await
        .unwrap_or(false)
}

/// Per-username login attempt tracking
///
/// Every attempt reserves a slot in the username's lockout window before the
/// password is checked, so concurrent guesses cannot outrun the counter. A
/// successful login releases the window. After `max_attempts` reservations
/// the username is rejected until the window started by the first attempt has
/// passed.
#[derive(Clone)]
pub struct LoginThrottle {
    /// username -> (`attempts`, `window_start`)
    state: Arc<DashMap<String, (u32, Instant)>>,
    max_attempts: u32,
    lockout: std::time::Duration,
    cleanup_threshold: usize,
}

impl LoginThrottle {
    /// Create a throttle
    #[must_use]
    pub fn new(max_attempts: u32, lockout: std::time::Duration) -> Self {
        Self {
            state: Arc::new(DashMap::new()),
            max_attempts,
            lockout,
            cleanup_threshold: THROTTLE_CLEANUP_THRESHOLD,
        }
    }

    /// Create from the auth section of the server config
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        let minutes = u64::try_from(config.login_lockout_minutes).unwrap_or(0);
        Self::new(
            config.max_login_attempts,
            std::time::Duration::from_secs(minutes * 60),
        )
    }

    /// Override the map size above which expired windows are pruned
    #[must_use]
    pub const fn with_cleanup_threshold(mut self, threshold: usize) -> Self {
        self.cleanup_threshold = threshold;
        self
    }

    /// Reserve a login attempt for a username
    ///
    /// Uses the `DashMap` entry API so the lockout check and the increment
    /// happen under one shard lock. Returns the attempt number in the window.
    ///
    /// # Errors
    ///
    /// Returns `RATE_LIMIT_EXCEEDED` while the username is locked
    pub fn begin_attempt(&self, username: &str) -> AppResult<u32> {
        let now = Instant::now();
        let mut entry = self.state.entry(username.to_owned()).or_insert((0, now));
        let (count, window_start) = entry.value_mut();

        if now.duration_since(*window_start) >= self.lockout {
            *count = 0;
            *window_start = now;
        }

        let locked = *count >= self.max_attempts;
        if !locked {
            *count = count.saturating_add(1);
        }
        let attempts = *count;
        drop(entry);

        if self.state.len() > self.cleanup_threshold {
            self.cleanup_expired(now);
        }

        if locked {
            AppLogger::log_security_event(
                "login_locked",
                "medium",
                "Login attempt while locked out",
                Some(username),
            );
            return Err(AppError::rate_limited(format!(
                "Too many failed login attempts. Try again in {} minutes",
                self.lockout.as_secs().div_ceil(60)
            )));
        }

        if attempts >= self.max_attempts {
            warn!(user.name = %username, attempts, "Last login attempt before lockout");
        }
        Ok(attempts)
    }

    /// Release the window after a successful login
    pub fn reset(&self, username: &str) {
        self.state.remove(username);
    }

    /// Attempts recorded for a username in the current window
    #[must_use]
    pub fn failures(&self, username: &str) -> u32 {
        self.state.get(username).map_or(0, |entry| entry.value().0)
    }

    /// Number of usernames currently tracked
    #[must_use]
    pub fn tracked_usernames(&self) -> usize {
        self.state.len()
    }

    /// Drop usernames whose lockout window has passed
    fn cleanup_expired(&self, now: Instant) {
        let before = self.state.len();
        self.state
            .retain(|_username, (_count, start)| now.duration_since(*start) < self.lockout);
        debug!(
            pruned = before.saturating_sub(self.state.len()),
            "Pruned expired login throttle entries"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "ana".into(),
            display_name: "Ana Horvat".into(),
            password_hash: String::new(),
            bio: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let auth = AuthManager::new(b"test-secret", 24);
        let user = sample_user();

        let token = auth.generate_token(&user).unwrap();
        let claims = auth.validate_token(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.username, "ana");
        assert_eq!(claims.iss, JWT_ISSUER);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_invalid() {
        let issuer = AuthManager::new(b"secret-one", 24);
        let verifier = AuthManager::new(b"secret-two", 24);
        let token = issuer.generate_token(&sample_user()).unwrap();

        let err = verifier.validate_token(&token).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::AuthInvalid);
    }

    #[test]
    fn test_expired_token() {
        let auth = AuthManager::new(b"test-secret", -1);
        let token = auth.generate_token(&sample_user()).unwrap();

        let err = auth.validate_token(&token).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::AuthExpired);
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let auth = AuthManager::new(b"test-secret", 24);
        let err = auth.validate_token("not.a.token").unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::AuthInvalid);
    }

    #[tokio::test]
    async fn test_password_hash_and_verify() {
        let hash = hash_password("lozinka123").await.unwrap();
        assert!(verify_password("lozinka123", &hash).await);
        assert!(!verify_password("kriva", &hash).await);
        assert!(!verify_password("lozinka123", "not-a-bcrypt-hash").await);
    }

    #[test]
    fn test_throttle_locks_after_max_attempts() {
        let throttle = LoginThrottle::new(3, std::time::Duration::from_secs(900));

        assert_eq!(throttle.begin_attempt("ana").unwrap(), 1);
        assert_eq!(throttle.begin_attempt("ana").unwrap(), 2);
        assert_eq!(throttle.begin_attempt("ana").unwrap(), 3);

        let err = throttle.begin_attempt("ana").unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::RateLimitExceeded);
        // Rejected attempts do not extend the count
        assert_eq!(throttle.failures("ana"), 3);
        assert_eq!(throttle.begin_attempt("ivan").unwrap(), 1);
    }

    #[test]
    fn test_throttle_reset_clears_attempts() {
        let throttle = LoginThrottle::new(3, std::time::Duration::from_secs(900));
        throttle.begin_attempt("ana").unwrap();
        throttle.begin_attempt("ana").unwrap();
        throttle.reset("ana");

        assert_eq!(throttle.failures("ana"), 0);
        assert_eq!(throttle.begin_attempt("ana").unwrap(), 1);
    }

    #[test]
    fn test_throttle_window_expires() {
        let throttle = LoginThrottle::new(1, std::time::Duration::ZERO);
        throttle.begin_attempt("ana").unwrap();
        assert_eq!(throttle.begin_attempt("ana").unwrap(), 1);
    }

    #[test]
    fn test_throttle_prunes_expired_windows() {
        let throttle = LoginThrottle::new(3, std::time::Duration::from_millis(50))
            .with_cleanup_threshold(4);

        for name in ["a", "b", "c", "d"] {
            throttle.begin_attempt(name).unwrap();
        }
        assert_eq!(throttle.tracked_usernames(), 4);

        std::thread::sleep(std::time::Duration::from_millis(80));
        throttle.begin_attempt("e").unwrap();

        assert_eq!(throttle.tracked_usernames(), 1);
        assert_eq!(throttle.failures("e"), 1);
        assert_eq!(throttle.failures("a"), 0);
    }

    #[test]
    fn test_throttle_keeps_live_windows_above_threshold() {
        let throttle = LoginThrottle::new(3, std::time::Duration::from_secs(900))
            .with_cleanup_threshold(4);

        for i in 0..10 {
            throttle.begin_attempt(&format!("korisnik{i}")).unwrap();
        }
        assert_eq!(throttle.tracked_usernames(), 10);
    }
}
