// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-only configuration for ports, database, auth policy and limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

//! Configuration module for the Recepti server
//!
//! - **Environment**: Server configuration from environment variables
//! - **Database**: Typed database location and pool size

/// Database configuration
pub mod database;
/// Environment and server configuration
pub mod environment;

pub use database::{DatabaseConfig, DatabaseUrl};
pub use environment::{AuthConfig, Environment, LimitsConfig, ServerConfig};
