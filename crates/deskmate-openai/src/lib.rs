// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI provider adapter for the Deskmate employee assistant.
//!
//! This crate implements [`CompletionProvider`] for the OpenAI Chat
//! Completions API, with function calling and JSON response formats.

pub mod client;
pub mod types;

use deskmate_core::DeskmateError;
use tracing::info;

pub use client::OpenAiClient;

/// Builds an [`OpenAiClient`] from an optional configured key.
///
/// # API Key Resolution
/// 1. `config_key` if set and non-empty
/// 2. `OPENAI_API_KEY` environment variable
/// 3. Returns error if neither is available
pub fn provider_from_key(config_key: &Option<String>) -> Result<OpenAiClient, DeskmateError> {
    let api_key = resolve_api_key(config_key)?;
    let client = OpenAiClient::new(api_key)?;
    info!("OpenAI provider initialized");
    Ok(client)
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, DeskmateError> {
    match config_key {
        Some(key) if !key.is_empty() => return Ok(key.clone()),
        _ => {}
    }

    std::env::var("OPENAI_API_KEY").map_err(|_| {
        DeskmateError::Config(
            "OpenAI API key not found. Set openai.api_key in config or OPENAI_API_KEY environment variable.".into(),
        )
    })
}
