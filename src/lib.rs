// ABOUTME: Main library entry point for the Recepti recipe sharing server
// ABOUTME: Accounts, recipe storage, ingredient search and pantry matching over a JSON HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

#![deny(unsafe_code)]

//! # Recepti Server
//!
//! A recipe sharing service. Users register, publish recipes, save other
//! people's recipes and comment on them. Every ingredient is reduced to a
//! canonical key at creation time so recipes can be searched by ingredient,
//! filtered by allergen category and ranked against a user's pantry.
//!
//! ## Architecture
//!
//! - **`recepti-matching`**: pure normalization, allergen detection, filters and ranking
//! - **Database**: `SQLite` storage with one manager per table
//! - **Services**: account, recipe and social operations on top of the database
//! - **Routes**: axum handlers translating HTTP requests into service calls
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recepti_server::config::ServerConfig;
//! use recepti_server::errors::AppResult;
//! use recepti_server::resources::ServerResources;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = Arc::new(ServerResources::from_config(config).await?);
//!     recepti_server::server::run(resources).await
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// Used by the binaries in src/bin/ and by the integration tests in tests/.

/// JWT issuance and validation, password hashing and login throttling
pub mod auth;

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// `SQLite` storage
pub mod database;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware (request ids and request tracing)
pub mod middleware;

/// Domain models
pub mod models;

/// Shared server resources (database, catalog, services)
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and the HTTP listener
pub mod server;

/// Account, recipe and social services
pub mod services;
