// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Reads ports, auth policy, result limits and catalog location from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

//! Environment-based configuration

use super::database::DatabaseConfig;
use crate::constants::{auth, limits, ports};
use crate::errors::{AppError, AppResult, ErrorCode};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Authentication policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
    /// Failed logins allowed per username inside the lockout window
    pub max_login_attempts: u32,
    /// Lockout window in minutes
    pub login_lockout_minutes: i64,
    /// Minimum password length at registration
    pub min_password_length: usize,
}

impl AuthConfig {
    /// Defaults with the given secret
    #[must_use]
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            jwt_expiry_hours: auth::JWT_EXPIRY_HOURS,
            max_login_attempts: auth::MAX_LOGIN_ATTEMPTS,
            login_lockout_minutes: auth::LOGIN_LOCKOUT_MINUTES,
            min_password_length: auth::MIN_PASSWORD_LENGTH,
        }
    }
}

/// Result size limits
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Limit applied when a request does not specify one
    pub default_result_limit: u32,
    /// Largest limit a request may ask for
    pub max_result_limit: u32,
    /// Comments returned per recipe
    pub comment_limit: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            default_result_limit: limits::DEFAULT_RESULT_LIMIT,
            max_result_limit: limits::MAX_RESULT_LIMIT,
            comment_limit: limits::DEFAULT_COMMENT_LIMIT,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database settings
    pub database: DatabaseConfig,
    /// Authentication policy
    pub auth: AuthConfig,
    /// Result limits
    pub limits: LimitsConfig,
    /// Optional YAML ingredient catalog replacing the built-in tables
    pub catalog_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed, `JWT_SECRET` is
    /// missing in production, or the values fail validation
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        );

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment.is_production() => {
                return Err(AppError::new(
                    ErrorCode::ConfigMissing,
                    "JWT_SECRET must be set in production",
                ));
            }
            _ => {
                warn!("JWT_SECRET not set, using an ephemeral secret for this process");
                generate_secret()
            }
        };

        let config = Self {
            http_port: env_parse("HTTP_PORT", ports::DEFAULT_HTTP_PORT)?,
            environment,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours: env_parse("JWT_EXPIRY_HOURS", auth::JWT_EXPIRY_HOURS)?,
                max_login_attempts: env_parse("MAX_LOGIN_ATTEMPTS", auth::MAX_LOGIN_ATTEMPTS)?,
                login_lockout_minutes: env_parse(
                    "LOGIN_LOCKOUT_MINUTES",
                    auth::LOGIN_LOCKOUT_MINUTES,
                )?,
                min_password_length: env_parse(
                    "MIN_PASSWORD_LENGTH",
                    auth::MIN_PASSWORD_LENGTH,
                )?,
            },
            limits: LimitsConfig {
                default_result_limit: env_parse(
                    "DEFAULT_RESULT_LIMIT",
                    limits::DEFAULT_RESULT_LIMIT,
                )?,
                max_result_limit: env_parse("MAX_RESULT_LIMIT", limits::MAX_RESULT_LIMIT)?,
                comment_limit: env_parse("COMMENT_LIMIT", limits::DEFAULT_COMMENT_LIMIT)?,
            },
            catalog_path: env::var("RECEPTI_CATALOG_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// In-memory configuration for tests and one-off tools
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            http_port: ports::DEFAULT_HTTP_PORT,
            environment: Environment::Testing,
            database: DatabaseConfig::memory(),
            auth: AuthConfig::with_secret(generate_secret()),
            limits: LimitsConfig::default(),
            catalog_path: None,
        }
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` when a value is out of its accepted range
    pub fn validate(&self) -> AppResult<()> {
        let invalid = |message: &str| -> AppResult<()> {
            Err(AppError::new(ErrorCode::ConfigInvalid, message))
        };

        if self.auth.jwt_expiry_hours <= 0 {
            return invalid("JWT_EXPIRY_HOURS must be positive");
        }
        if self.auth.max_login_attempts == 0 {
            return invalid("MAX_LOGIN_ATTEMPTS must be at least 1");
        }
        if self.auth.login_lockout_minutes <= 0 {
            return invalid("LOGIN_LOCKOUT_MINUTES must be positive");
        }
        if self.auth.min_password_length == 0 {
            return invalid("MIN_PASSWORD_LENGTH must be at least 1");
        }
        if self.limits.default_result_limit == 0 || self.limits.comment_limit == 0 {
            return invalid("Result limits must be at least 1");
        }
        if self.limits.default_result_limit > self.limits.max_result_limit {
            return invalid("DEFAULT_RESULT_LIMIT cannot exceed MAX_RESULT_LIMIT");
        }
        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Recepti Server Configuration:\n\
             - Environment: {}\n\
             - HTTP Port: {}\n\
             - Database: {}\n\
             - JWT Expiry: {}h\n\
             - Login Attempts: {} per {} min\n\
             - Result Limits: default {}, max {}\n\
             - Ingredient Catalog: {}",
            self.environment,
            self.http_port,
            if self.database.url.is_memory() {
                "SQLite (in-memory)"
            } else {
                "SQLite (file)"
            },
            self.auth.jwt_expiry_hours,
            self.auth.max_login_attempts,
            self.auth.login_lockout_minutes,
            self.limits.default_result_limit,
            self.limits.max_result_limit,
            self.catalog_path
                .as_ref()
                .map_or_else(|| "built-in".to_owned(), |p| p.display().to_string()),
        )
    }
}

/// Parse an environment variable or fall back to a default
fn env_parse<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value '{value}': {e}"))),
        Err(_) => Ok(default),
    }
}

/// Random alphanumeric secret for development and tests
fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}
