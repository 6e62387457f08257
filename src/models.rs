// ABOUTME: Domain models re-exported from recepti-core
// ABOUTME: Users, recipes, ingredients, saves and comments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

pub use recepti_core::models::*;
