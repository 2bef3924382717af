// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool trait and registry for the mock task subsystems.
//!
//! The [`Tool`] trait defines the unified interface every task tool
//! implements. The [`ToolRegistry`] manages tool lookup by name, generates
//! the [`ToolSpec`] catalog for the completion engine, and dispatches tool
//! calls. Dispatch never fails: unknown tools and handler errors come back
//! as error-shaped [`ToolOutput`] data for the model to read.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use deskmate_core::types::ToolSpec;
use deskmate_core::DeskmateError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Output from a tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// The content returned by the tool, as a JSON-encoded string.
    pub content: String,
    /// Whether the tool invocation resulted in an error.
    pub is_error: bool,
}

impl ToolOutput {
    /// Wraps a serializable result as a successful output.
    pub fn json(value: &impl Serialize) -> Self {
        Self {
            content: serde_json::to_string(value).unwrap_or_else(|_| "null".to_string()),
            is_error: false,
        }
    }

    /// Wraps an error message as `{"error": ...}` data.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: serde_json::json!({ "error": message.into() }).to_string(),
            is_error: true,
        }
    }
}

/// Unified trait for all task tools.
///
/// Every tool provides a name, description, JSON Schema for its parameters,
/// and an async `invoke` method. The chat engine calls `invoke` with the
/// requesting employee's id and the parsed JSON arguments from the model's
/// tool call.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool's unique name (used for lookup and API serialization).
    fn name(&self) -> &str;

    /// Returns a human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// Returns the JSON Schema describing the tool's input parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Invokes the tool for the given employee with the given JSON input.
    async fn invoke(
        &self,
        employee_id: &str,
        input: serde_json::Value,
    ) -> Result<ToolOutput, DeskmateError>;
}

/// Registry of available tools, indexed by name.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates an empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registers a tool. The tool is indexed by its `name()`.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Looks up a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Returns (name, description) pairs for all registered tools.
    pub fn list(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .tools
            .values()
            .map(|t| (t.name(), t.description()))
            .collect();
        entries.sort_by_key(|(name, _)| *name);
        entries
    }

    /// Returns the tool catalog for the completion engine, sorted by name.
    pub fn tool_specs(&self) -> Vec<ToolSpec> {
        let mut specs: Vec<ToolSpec> = self
            .tools
            .values()
            .map(|t| ToolSpec {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters_schema(),
            })
            .collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    /// Dispatches a tool call for an employee.
    ///
    /// Never returns an error: an unknown tool name or a failing handler is
    /// converted into error-shaped output so the model can relay it.
    pub async fn dispatch(
        &self,
        name: &str,
        employee_id: &str,
        input: serde_json::Value,
    ) -> ToolOutput {
        let Some(tool) = self.get(name) else {
            warn!(tool = name, "tool call for unregistered tool");
            return ToolOutput::error(format!("Unknown tool: {name}"));
        };
        debug!(tool = name, employee_id, "executing tool");
        match tool.invoke(employee_id, input).await {
            Ok(output) => output,
            Err(e) => {
                warn!(tool = name, error = %e, "tool invocation failed");
                ToolOutput::error(e.to_string())
            }
        }
    }

    /// Returns the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a human-readable prefixed id: `{prefix}-XXXXXXXX` using the
/// first 8 hex characters of a v4 UUID, uppercased.
pub(crate) fn prefixed_id(prefix: &str) -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", uuid[..8].to_uppercase())
}

/// Today's date as YYYY-MM-DD (UTC).
pub(crate) fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Current instant as an RFC 3339 timestamp.
pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A simple test tool for registry tests.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes the input back"
        }

        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {
                    "message": { "type": "string", "description": "Message to echo" }
                },
                "required": ["message"]
            })
        }

        async fn invoke(
            &self,
            _employee_id: &str,
            input: serde_json::Value,
        ) -> Result<ToolOutput, DeskmateError> {
            let message = input["message"].as_str().unwrap_or("no message");
            Ok(ToolOutput::json(&serde_json::json!({ "echo": message })))
        }
    }

    /// A tool whose handler always fails, for dispatch tests.
    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        fn name(&self) -> &str {
            "failing"
        }

        fn description(&self) -> &str {
            "Always fails"
        }

        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({"type": "object", "properties": {}})
        }

        async fn invoke(
            &self,
            _employee_id: &str,
            _input: serde_json::Value,
        ) -> Result<ToolOutput, DeskmateError> {
            Err(DeskmateError::Internal("boom".into()))
        }
    }

    #[test]
    fn registry_registers_and_retrieves_tools() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let tool = registry.get("echo");
        assert!(tool.is_some());
        assert_eq!(tool.unwrap().name(), "echo");
    }

    #[test]
    fn registry_returns_none_for_unknown_tools() {
        let registry = ToolRegistry::new();
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn tool_specs_are_sorted_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FailingTool));
        registry.register(Arc::new(EchoTool));

        let specs = registry.tool_specs();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].name, "echo");
        assert_eq!(specs[1].name, "failing");
        assert_eq!(specs[0].parameters["type"], "object");
    }

    #[tokio::test]
    async fn dispatch_unknown_tool_returns_error_data() {
        let registry = ToolRegistry::new();
        let output = registry
            .dispatch("no_such_tool", "EMP001", serde_json::json!({}))
            .await;
        assert!(output.is_error);
        let body: serde_json::Value = serde_json::from_str(&output.content).unwrap();
        assert_eq!(body["error"], "Unknown tool: no_such_tool");
    }

    #[tokio::test]
    async fn dispatch_failing_handler_returns_error_data() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FailingTool));

        let output = registry
            .dispatch("failing", "EMP001", serde_json::json!({}))
            .await;
        assert!(output.is_error);
        assert!(output.content.contains("boom"));
    }

    #[tokio::test]
    async fn dispatch_success_returns_tool_output() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let output = registry
            .dispatch("echo", "EMP001", serde_json::json!({"message": "hello"}))
            .await;
        assert!(!output.is_error);
        let body: serde_json::Value = serde_json::from_str(&output.content).unwrap();
        assert_eq!(body["echo"], "hello");
    }

    #[test]
    fn prefixed_id_shape() {
        let id = prefixed_id("CAB");
        assert!(id.starts_with("CAB-"));
        assert_eq!(id.len(), 4 + 8);
        let suffix = &id[4..];
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn prefixed_ids_are_unique() {
        let a = prefixed_id("TS");
        let b = prefixed_id("TS");
        assert_ne!(a, b);
    }
}
