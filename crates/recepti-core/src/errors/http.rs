// ABOUTME: Axum integration for AppError so handlers can return Result<Response, AppError>
// ABOUTME: Renders errors as ErrorResponse JSON and maps extractor rejections to INVALID_INPUT
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use super::{AppError, ErrorCode, ErrorResponse};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                error.code = ?self.code,
                error.message = %self.message,
                error.resource = ?self.context.resource_id,
                error.source = ?self.source,
                "Request failed"
            );
        } else {
            tracing::debug!(
                error.code = ?self.code,
                error.message = %self.message,
                error.resource = ?self.context.resource_id,
                "Request rejected"
            );
        }

        let body = ErrorResponse::from(self);
        let mut response = (status, Json(body.clone())).into_response();
        // Lets the request-id middleware re-render the body with the correlation id
        response.extensions_mut().insert(body);
        response
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(
            ErrorCode::InvalidInput,
            format!("Invalid JSON body: {}", rejection.body_text()),
        )
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(
            ErrorCode::InvalidInput,
            format!("Invalid query parameters: {}", rejection.body_text()),
        )
    }
}
