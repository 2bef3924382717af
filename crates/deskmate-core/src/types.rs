// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical domain types shared across the Deskmate workspace.
//!
//! These types cross the adapter trait boundaries: the completion engine,
//! the memory gateway, the session store, and the HTTP gateway all speak
//! in terms of the structs defined here.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A registered employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Human-assigned unique identifier (e.g. "EMP001"), not the row id.
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// RFC 3339 last-update timestamp.
    pub updated_at: String,
}

/// A conversation session. The most recently created session for an
/// employee is their current one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: i64,
    pub employee_id: String,
    pub created_at: String,
}

/// A persisted chat message. Only `user` and `assistant` roles are ever
/// written to storage; tool exchanges stay in the working turn list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub session_id: i64,
    pub role: String,
    pub content: String,
    pub created_at: String,
}

/// Closed taxonomy for classified memories.
///
/// The classifier model is instructed to emit exactly these snake_case
/// values; anything else is coerced to `GeneralPreferences` via
/// [`MemoryCategory::parse_lossy`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MemoryCategory {
    FoodPreferences,
    TravelPreferences,
    WorkSchedule,
    LeaveTimeOff,
    ExpenseFinance,
    PersonalInfo,
    CommunicationStyle,
    GeneralPreferences,
}

impl MemoryCategory {
    /// Parses a category name, coercing anything outside the taxonomy to
    /// `GeneralPreferences` so a positive store decision is never lost.
    pub fn parse_lossy(s: &str) -> Self {
        Self::from_str(s).unwrap_or(Self::GeneralPreferences)
    }
}

/// A memory returned by the memory gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: String,
    /// The memory text itself.
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<MemoryCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Relevance score for search results; absent on plain listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// A tool invocation requested by the completion engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCallRequest {
    /// Provider-assigned call id, echoed back on the tool result turn.
    pub id: String,
    pub name: String,
    /// Parsed JSON arguments.
    pub arguments: serde_json::Value,
}

/// Tool definition advertised to the completion engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON Schema for the tool's arguments.
    pub parameters: serde_json::Value,
}

/// One turn in the working message list sent to the completion engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRequest>,
    /// Set on `tool` turns to link the result back to its call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// An assistant turn that carries tool calls (content may be empty).
    pub fn assistant_tool_calls(content: Option<String>, tool_calls: Vec<ToolCallRequest>) -> Self {
        Self {
            role: "assistant".to_string(),
            content,
            tool_calls,
            tool_call_id: None,
        }
    }

    /// A tool result turn keyed by the originating call id.
    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: "tool".to_string(),
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
        }
    }
}

/// Structured output constraint for a completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Force the model to emit a single JSON object.
    JsonObject,
}

/// Request to the completion engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    /// System prompt, sent as the leading system turn.
    pub system: Option<String>,
    pub messages: Vec<ChatTurn>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// Response from the completion engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub model: String,
    /// Plain text content; `None` when the model only requested tools.
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<ToolCallRequest>,
    pub finish_reason: Option<String>,
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// True when the model asked for at least one tool invocation.
    pub fn wants_tools(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Token accounting from a completion call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn memory_category_has_eight_variants() {
        assert_eq!(MemoryCategory::iter().count(), 8);
    }

    #[test]
    fn memory_category_round_trips_snake_case() {
        for category in MemoryCategory::iter() {
            let s = category.to_string();
            assert_eq!(MemoryCategory::parse_lossy(&s), category, "round trip {s}");
        }
        assert_eq!(
            MemoryCategory::parse_lossy("food_preferences"),
            MemoryCategory::FoodPreferences
        );
    }

    #[test]
    fn memory_category_parse_lossy_coerces_unknown() {
        assert_eq!(
            MemoryCategory::parse_lossy("coffee_opinions"),
            MemoryCategory::GeneralPreferences
        );
        assert_eq!(
            MemoryCategory::parse_lossy(""),
            MemoryCategory::GeneralPreferences
        );
    }

    #[test]
    fn memory_category_serde_uses_snake_case() {
        let json = serde_json::to_string(&MemoryCategory::LeaveTimeOff).unwrap();
        assert_eq!(json, "\"leave_time_off\"");
        let parsed: MemoryCategory = serde_json::from_str("\"work_schedule\"").unwrap();
        assert_eq!(parsed, MemoryCategory::WorkSchedule);
    }

    #[test]
    fn chat_turn_constructors_set_roles() {
        let user = ChatTurn::user("hi");
        assert_eq!(user.role, "user");
        assert_eq!(user.content.as_deref(), Some("hi"));

        let tool = ChatTurn::tool("call_1", "{\"ok\":true}");
        assert_eq!(tool.role, "tool");
        assert_eq!(tool.tool_call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn completion_response_wants_tools() {
        let mut resp = CompletionResponse {
            id: "r1".into(),
            model: "m".into(),
            content: None,
            tool_calls: vec![],
            finish_reason: Some("stop".into()),
            usage: TokenUsage::default(),
        };
        assert!(!resp.wants_tools());

        resp.tool_calls.push(ToolCallRequest {
            id: "call_1".into(),
            name: "book_cab".into(),
            arguments: serde_json::json!({}),
        });
        assert!(resp.wants_tools());
    }
}
