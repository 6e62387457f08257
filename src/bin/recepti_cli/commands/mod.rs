// ABOUTME: Re-exports command modules for recepti-cli
// ABOUTME: Provides ingredient inspection and demo data seeding commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

pub mod ingredients;
pub mod seed;
