// ABOUTME: Unified error handling re-exported from recepti-core
// ABOUTME: AppError, ErrorCode and ErrorResponse with HTTP and database conversions enabled
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

pub use recepti_core::errors::*;
