// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Generates x-request-id values, creates one span per request and stamps ids on error bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use crate::constants::headers::REQUEST_ID;
use crate::errors::ErrorResponse;
use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{header::CONTENT_LENGTH, HeaderName, HeaderValue, Request, Response};
use axum::middleware::Next;
use std::time::Duration;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Header carrying the request correlation id
#[must_use]
pub fn request_id_header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID)
}

/// Generates `req_<uuid>` ids for requests that arrive without one
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdGenerator;

impl MakeRequestId for RequestIdGenerator {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = format!("req_{}", Uuid::new_v4().simple());
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Span for one HTTP request, keyed by the matched route
pub fn create_request_span<B>(request: &Request<B>) -> Span {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);
    let request_id = request
        .headers()
        .get(REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %path,
        request_id = %request_id,
    )
}

/// Log the response status and latency inside the request span
pub fn log_response<B>(response: &Response<B>, latency: Duration, _span: &Span) {
    let status = response.status().as_u16();
    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
    if status >= 500 {
        tracing::error!(status, latency_ms, "Request failed with server error");
    } else {
        tracing::info!(status, latency_ms, "Request completed");
    }
}

/// Log a failure classified by the trace layer
pub fn log_failure(error: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
    tracing::error!(error = %error, latency_ms, "Request failed");
}

/// Copy the request correlation id into JSON error bodies
///
/// Runs inside `SetRequestIdLayer`, so every request carries an id by the
/// time it gets here. Only responses rendered from an `AppError` are touched.
pub async fn attach_request_id(request: Request<Body>, next: Next) -> Response<Body> {
    let request_id = request
        .headers()
        .get(REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);

    let mut response = next.run(request).await;
    let Some(request_id) = request_id else {
        return response;
    };
    let Some(body) = response.extensions_mut().remove::<ErrorResponse>() else {
        return response;
    };

    match serde_json::to_vec(&body.with_request_id(request_id)) {
        Ok(bytes) => {
            response.headers_mut().remove(CONTENT_LENGTH);
            *response.body_mut() = Body::from(bytes);
        }
        Err(e) => tracing::warn!("Failed to attach request id to error body: {e}"),
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_prefixed_and_unique() {
        let request = Request::new(());
        let mut generator = RequestIdGenerator;

        let first = generator.make_request_id(&request).unwrap();
        let second = generator.make_request_id(&request).unwrap();

        let first = first.header_value().to_str().unwrap().to_owned();
        assert!(first.starts_with("req_"));
        assert_ne!(first, second.header_value().to_str().unwrap());
    }
}
