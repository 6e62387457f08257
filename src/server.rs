// ABOUTME: HTTP server assembly: merges route groups, adds tracing layers and serves with graceful shutdown
// ABOUTME: The router is built separately so tests can drive it without a socket
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recepti Contributors

use crate::errors::{AppError, AppResult};
use crate::middleware::{
    attach_request_id, create_request_span, log_failure, log_response, request_id_header,
    RequestIdGenerator,
};
use crate::resources::ServerResources;
use crate::routes::{AuthRoutes, HealthRoutes, IngredientRoutes, RecipeRoutes, SocialRoutes};
use axum::{middleware, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the full application router
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let header = request_id_header();

    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(IngredientRoutes::routes(resources.clone()))
        .merge(RecipeRoutes::routes(resources.clone()))
        .merge(SocialRoutes::routes(resources))
        .layer(middleware::from_fn(attach_request_id))
        .layer(PropagateRequestIdLayer::new(header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(create_request_span)
                .on_response(log_response)
                .on_failure(log_failure),
        )
        .layer(SetRequestIdLayer::new(header, RequestIdGenerator))
}

/// Bind the configured port and serve until Ctrl-C
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>) -> AppResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], resources.config.http_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("HTTP server listening on {addr}");

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("HTTP server error: {e}")))?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
