// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Deskmate employee assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Deskmate configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeskmateConfig {
    /// Assistant identity and chat-engine tunables.
    #[serde(default)]
    pub agent: AgentConfig,

    /// OpenAI API settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// mem0 memory service settings.
    #[serde(default)]
    pub mem0: Mem0Config,

    /// SQLite storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Assistant identity and chat-engine tunables.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Number of recent persisted messages replayed as conversation context.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Maximum memories retrieved per turn for prompt injection.
    #[serde(default = "default_memory_limit")]
    pub memory_limit: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            history_limit: default_history_limit(),
            memory_limit: default_memory_limit(),
        }
    }
}

fn default_agent_name() -> String {
    "deskmate".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_history_limit() -> usize {
    10
}

fn default_memory_limit() -> usize {
    5
}

/// OpenAI API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// OpenAI API key. `None` requires the environment variable override.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for conversation turns.
    #[serde(default = "default_model")]
    pub model: String,

    /// Model used for memory classification (cheap, deterministic calls).
    #[serde(default = "default_model")]
    pub classifier_model: String,

    /// Maximum tokens to generate per conversational response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            classifier_model: default_model(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

/// mem0 memory service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Mem0Config {
    /// mem0 API key. `None` requires the environment variable override.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the mem0 API.
    #[serde(default = "default_mem0_base_url")]
    pub base_url: String,
}

impl Default for Mem0Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_mem0_base_url(),
        }
    }
}

fn default_mem0_base_url() -> String {
    "https://api.mem0.ai".to_string()
}

/// SQLite storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "deskmate.db".to_string()
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_partial_toml_with_defaults() {
        let toml_str = r#"
            [openai]
            api_key = "sk-test"
            model = "gpt-4o"

            [gateway]
            port = 8080
        "#;
        let config: DeskmateConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.openai.model, "gpt-4o");
        assert_eq!(config.openai.max_tokens, 1024);
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.agent.name, "deskmate");
    }

    #[test]
    fn rejects_unknown_fields() {
        let toml_str = r#"
            [agent]
            nmae = "typo"
        "#;
        let result = toml::from_str::<DeskmateConfig>(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn empty_input_yields_defaults() {
        let config: DeskmateConfig = toml::from_str("").unwrap();
        assert_eq!(config.storage.database_path, "deskmate.db");
        assert_eq!(config.agent.history_limit, 10);
        assert_eq!(config.mem0.base_url, "https://api.mem0.ai");
    }
}
