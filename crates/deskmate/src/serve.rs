// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wires the configured components together and runs the HTTP server.

use std::sync::Arc;

use deskmate_agent::{ChatEngine, EngineOptions};
use deskmate_config::DeskmateConfig;
use deskmate_core::DeskmateError;
use deskmate_gateway::{start_server, GatewayState, ServerConfig};
use deskmate_storage::Database;
use deskmate_tools::standard_registry;

pub async fn run(config: DeskmateConfig) -> Result<(), DeskmateError> {
    let provider = Arc::new(deskmate_openai::provider_from_key(&config.openai.api_key)?);
    let memory = Arc::new(deskmate_mem0::gateway_from_key(
        &config.mem0.api_key,
        &config.mem0.base_url,
    )?);
    let db = Database::open(&config.storage.database_path).await?;

    let engine = Arc::new(ChatEngine::new(
        provider,
        memory.clone(),
        Arc::new(standard_registry()),
        db.clone(),
        EngineOptions {
            model: config.openai.model.clone(),
            classifier_model: config.openai.classifier_model.clone(),
            max_tokens: config.openai.max_tokens,
            history_limit: config.agent.history_limit,
            memory_limit: config.agent.memory_limit,
        },
    ));

    let state = GatewayState {
        engine,
        db,
        memory,
        start_time: std::time::Instant::now(),
    };

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    tracing::info!(
        model = %config.openai.model,
        database = %config.storage.database_path,
        "deskmate starting"
    );
    start_server(&server_config, state).await
}
