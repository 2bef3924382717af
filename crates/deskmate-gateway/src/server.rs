// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use deskmate_agent::ChatEngine;
use deskmate_core::{DeskmateError, MemoryGateway};
use deskmate_storage::Database;
use tower_http::cors::CorsLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Conversation orchestrator.
    pub engine: Arc<ChatEngine>,
    /// SQLite handle for employee/session/message queries.
    pub db: Database,
    /// Memory gateway for the /api/memories surface.
    pub memory: Arc<dyn MemoryGateway>,
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Gateway server configuration (mirrors GatewayConfig from deskmate-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the full route tree over the given state.
pub fn router(state: GatewayState) -> Router {
    let employee_routes = Router::new()
        .route("/api/employees", post(handlers::register_employee))
        .route("/api/employees", get(handlers::list_employees))
        .route("/api/employees/{employee_id}", get(handlers::get_employee))
        .route("/api/employees/{employee_id}", put(handlers::update_employee));

    let chat_routes = Router::new()
        .route("/api/chat", post(handlers::post_chat))
        .route("/api/chat/history/{employee_id}", get(handlers::get_chat_history))
        .route("/api/chat/new-session", post(handlers::new_session));

    let memory_routes = Router::new()
        .route("/api/memories/{employee_id}", get(handlers::get_memories))
        .route("/api/memories/{employee_id}/search", post(handlers::search_memories))
        .route(
            "/api/memories/{employee_id}/{memory_id}",
            delete(handlers::delete_memory),
        )
        .route("/api/memories/{employee_id}", delete(handlers::delete_all_memories));

    Router::new()
        .route("/health", get(handlers::get_health))
        .merge(employee_routes)
        .merge(chat_routes)
        .merge(memory_routes)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Binds to the configured host:port and serves until the process exits.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), DeskmateError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| DeskmateError::Gateway {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| DeskmateError::Gateway {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
