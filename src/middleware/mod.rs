// ABOUTME: HTTP middleware for request tracing and correlation ids
// ABOUTME: Request ID generation and per-request span creation for structured logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

pub mod tracing;

// Request tracing and correlation
pub use self::tracing::{
    attach_request_id, create_request_span, log_failure, log_response, request_id_header,
    RequestIdGenerator,
};
