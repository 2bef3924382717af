// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! mem0 memory service adapter for the Deskmate employee assistant.
//!
//! Implements the `MemoryGateway` trait against the mem0 REST API. All
//! operations are partitioned per employee via the `user_id` parameter.

pub mod client;
pub mod types;

use deskmate_core::DeskmateError;
use tracing::info;

pub use client::Mem0Client;

/// Builds a [`Mem0Client`] from an optional configured key and base URL.
///
/// # API Key Resolution
/// 1. `config_key` if set and non-empty
/// 2. `MEM0_API_KEY` environment variable
/// 3. Returns error if neither is available
pub fn gateway_from_key(
    config_key: &Option<String>,
    base_url: &str,
) -> Result<Mem0Client, DeskmateError> {
    let api_key = resolve_api_key(config_key)?;
    let client = Mem0Client::new(api_key, base_url.to_string())?;
    info!(base_url, "mem0 gateway initialized");
    Ok(client)
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, DeskmateError> {
    match config_key {
        Some(key) if !key.is_empty() => return Ok(key.clone()),
        _ => {}
    }

    std::env::var("MEM0_API_KEY").map_err(|_| {
        DeskmateError::Config(
            "mem0 API key not found. Set mem0.api_key in config or MEM0_API_KEY environment variable.".into(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_api_key_from_config() {
        let result = resolve_api_key(&Some("m0-abc".into()));
        assert_eq!(result.unwrap(), "m0-abc");
    }

    #[test]
    fn resolve_api_key_none_reports_actionable_error() {
        let result = resolve_api_key(&None);
        if result.is_err() {
            let err = result.unwrap_err().to_string();
            assert!(err.contains("API key not found"), "got: {err}");
        }
    }
}
