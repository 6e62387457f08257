// ABOUTME: Core types and constants for the Recepti recipe sharing service
// ABOUTME: Foundation crate with error handling, constants, and domain models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

#![deny(unsafe_code)]

//! # Recepti Core
//!
//! Foundation crate providing shared types and constants for the Recepti
//! recipe sharing service. It changes rarely, so the matching engine and the
//! server crate can build on it without recompiling each other.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and `ErrorResponse`
//! - **constants**: Limits, defaults and service names
//! - **models**: Users, recipes, ingredients, saves and comments

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (User, Recipe, IngredientEntry, Comment, ...)
pub mod models;
