// ABOUTME: Application constants re-exported from recepti-core
// ABOUTME: Limits, auth defaults, ports, endpoints and service names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

pub use recepti_core::constants::*;
