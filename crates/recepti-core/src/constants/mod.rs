// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for limits, defaults, endpoints and service names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

//! Constants module
//!
//! Application constants grouped by domain. Values that operators may want to
//! tune are only defaults here; the server configuration reads overrides from
//! the environment.

/// Result-size limits for listing, searching and ranking
pub mod limits {
    /// Default number of recipes returned by list/search/pantry endpoints
    pub const DEFAULT_RESULT_LIMIT: u32 = 50;
    /// Largest accepted `limit` query parameter
    pub const MAX_RESULT_LIMIT: u32 = 500;
    /// Default number of comments returned for a recipe
    pub const DEFAULT_COMMENT_LIMIT: u32 = 100;
    /// Default minimum pantry overlap
    pub const DEFAULT_MIN_MATCH: u32 = 1;
}

/// Account and session defaults
pub mod auth {
    /// Failed logins allowed per username before the lockout kicks in
    pub const MAX_LOGIN_ATTEMPTS: u32 = 3;
    /// Minutes a username stays locked after too many failures
    pub const LOGIN_LOCKOUT_MINUTES: i64 = 15;
    /// Tracked usernames above which expired lockout windows are pruned
    pub const THROTTLE_CLEANUP_THRESHOLD: usize = 10_000;
    /// Minimum password length accepted at registration
    pub const MIN_PASSWORD_LENGTH: usize = 8;
    /// JWT lifetime in hours
    pub const JWT_EXPIRY_HOURS: i64 = 24;
    /// JWT issuer claim
    pub const JWT_ISSUER: &str = "recepti";
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// API endpoints
pub mod endpoints {
    /// Health check endpoint
    pub const HEALTH_CHECK: &str = "/health";
    /// API base path
    pub const API_BASE: &str = "/api";
}

/// Service identifiers used in logs
pub mod service_names {
    /// HTTP server
    pub const RECEPTI_SERVER: &str = "recepti-server";
    /// Management CLI
    pub const RECEPTI_CLI: &str = "recepti-cli";
}

/// HTTP header names
pub mod headers {
    /// Request correlation header
    pub const REQUEST_ID: &str = "x-request-id";
}
