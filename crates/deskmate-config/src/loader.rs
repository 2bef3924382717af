// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./deskmate.toml` > `~/.config/deskmate/deskmate.toml` > `/etc/deskmate/deskmate.toml`
//! with environment variable overrides via `DESKMATE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::DeskmateConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/deskmate/deskmate.toml` (system-wide)
/// 3. `~/.config/deskmate/deskmate.toml` (user XDG config)
/// 4. `./deskmate.toml` (local directory)
/// 5. `DESKMATE_*` environment variables
pub fn load_config() -> Result<DeskmateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DeskmateConfig::default()))
        .merge(Toml::file("/etc/deskmate/deskmate.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("deskmate/deskmate.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("deskmate.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<DeskmateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DeskmateConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DeskmateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DeskmateConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `DESKMATE_OPENAI_API_KEY` must map to
/// `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("DESKMATE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: DESKMATE_OPENAI_API_KEY -> "openai_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("mem0_", "mem0.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}
