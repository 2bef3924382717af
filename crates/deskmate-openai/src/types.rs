// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the OpenAI Chat Completions API.
//!
//! These mirror the JSON request/response shapes exactly; conversion to and
//! from the canonical `deskmate-core` types happens at the client boundary.
//! The notable impedance mismatch: OpenAI carries tool-call arguments as a
//! JSON-encoded *string*, while core types use `serde_json::Value`.

use deskmate_core::types::{
    ChatTurn, CompletionRequest, CompletionResponse, ResponseFormat, TokenUsage, ToolCallRequest,
    ToolSpec,
};
use deskmate_core::DeskmateError;
use serde::{Deserialize, Serialize};

/// A message in the OpenAI wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ApiToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

/// A tool call in the OpenAI wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub function: ApiFunctionCall,
}

/// The function payload of a tool call. `arguments` is a JSON-encoded string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFunctionCall {
    pub name: String,
    pub arguments: String,
}

/// A tool definition in the OpenAI wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTool {
    #[serde(rename = "type")]
    pub type_: String,
    pub function: ApiFunction,
}

/// The function schema inside a tool definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFunction {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Structured output constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponseFormat {
    #[serde(rename = "type")]
    pub type_: String,
}

/// Request body for POST /v1/chat/completions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ApiTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ApiResponseFormat>,
}

/// Response body from POST /v1/chat/completions.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<ApiChoice>,
    #[serde(default)]
    pub usage: Option<ApiUsage>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiChoice {
    pub message: ApiMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage accounting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

/// Error envelope returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// The error detail inside an [`ApiErrorResponse`].
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub message: String,
}

/// Converts a canonical request into the OpenAI wire format.
pub fn to_wire_request(request: &CompletionRequest) -> ChatRequest {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    if let Some(system) = &request.system {
        messages.push(ApiMessage {
            role: "system".to_string(),
            content: Some(system.clone()),
            tool_calls: None,
            tool_call_id: None,
        });
    }
    for turn in &request.messages {
        messages.push(to_wire_message(turn));
    }

    let tools = if request.tools.is_empty() {
        None
    } else {
        Some(request.tools.iter().map(to_wire_tool).collect())
    };
    // OpenAI rejects tool_choice without tools.
    let tool_choice = tools.as_ref().map(|_| "auto".to_string());

    ChatRequest {
        model: request.model.clone(),
        messages,
        tools,
        tool_choice,
        temperature: request.temperature,
        max_tokens: request.max_tokens,
        response_format: request.response_format.map(|f| match f {
            ResponseFormat::JsonObject => ApiResponseFormat {
                type_: "json_object".to_string(),
            },
        }),
    }
}

fn to_wire_message(turn: &ChatTurn) -> ApiMessage {
    let tool_calls = if turn.tool_calls.is_empty() {
        None
    } else {
        Some(
            turn.tool_calls
                .iter()
                .map(|call| ApiToolCall {
                    id: call.id.clone(),
                    type_: "function".to_string(),
                    function: ApiFunctionCall {
                        name: call.name.clone(),
                        arguments: call.arguments.to_string(),
                    },
                })
                .collect(),
        )
    };
    ApiMessage {
        role: turn.role.clone(),
        content: turn.content.clone(),
        tool_calls,
        tool_call_id: turn.tool_call_id.clone(),
    }
}

fn to_wire_tool(spec: &ToolSpec) -> ApiTool {
    ApiTool {
        type_: "function".to_string(),
        function: ApiFunction {
            name: spec.name.clone(),
            description: spec.description.clone(),
            parameters: spec.parameters.clone(),
        },
    }
}

/// Converts an OpenAI wire response into the canonical response type.
///
/// Fails when the response has no choices or a tool call carries
/// unparseable arguments.
pub fn from_wire_response(response: ChatResponse) -> Result<CompletionResponse, DeskmateError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| DeskmateError::Provider {
            message: "API response contained no choices".to_string(),
            source: None,
        })?;

    let mut tool_calls = Vec::new();
    for call in choice.message.tool_calls.unwrap_or_default() {
        let arguments: serde_json::Value =
            serde_json::from_str(&call.function.arguments).map_err(|e| {
                DeskmateError::Provider {
                    message: format!(
                        "tool call `{}` carried malformed arguments: {e}",
                        call.function.name
                    ),
                    source: Some(Box::new(e)),
                }
            })?;
        tool_calls.push(ToolCallRequest {
            id: call.id,
            name: call.function.name,
            arguments,
        });
    }

    let usage = response.usage.unwrap_or_default();
    Ok(CompletionResponse {
        id: response.id,
        model: response.model,
        content: choice.message.content,
        tool_calls,
        finish_reason: choice.finish_reason,
        usage: TokenUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_becomes_leading_system_message() {
        let request = CompletionRequest {
            model: "gpt-4o-mini".into(),
            system: Some("You are helpful.".into()),
            messages: vec![ChatTurn::user("hi")],
            max_tokens: Some(100),
            temperature: Some(0.7),
            tools: vec![],
            response_format: None,
        };
        let wire = to_wire_request(&request);
        assert_eq!(wire.messages.len(), 2);
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[1].role, "user");
        assert!(wire.tools.is_none());
        assert!(wire.tool_choice.is_none());
    }

    #[test]
    fn tools_enable_auto_tool_choice() {
        let request = CompletionRequest {
            model: "gpt-4o-mini".into(),
            system: None,
            messages: vec![ChatTurn::user("book a cab")],
            max_tokens: None,
            temperature: None,
            tools: vec![ToolSpec {
                name: "book_cab".into(),
                description: "Book a cab".into(),
                parameters: serde_json::json!({"type": "object", "properties": {}}),
            }],
            response_format: None,
        };
        let wire = to_wire_request(&request);
        assert_eq!(wire.tool_choice.as_deref(), Some("auto"));
        assert_eq!(wire.tools.as_ref().unwrap()[0].function.name, "book_cab");
    }

    #[test]
    fn tool_call_arguments_serialize_as_json_string() {
        let turn = ChatTurn::assistant_tool_calls(
            None,
            vec![ToolCallRequest {
                id: "call_1".into(),
                name: "order_food".into(),
                arguments: serde_json::json!({"items": ["coffee"]}),
            }],
        );
        let wire = to_wire_message(&turn);
        let calls = wire.tool_calls.unwrap();
        assert_eq!(calls[0].function.arguments, r#"{"items":["coffee"]}"#);
    }

    #[test]
    fn response_tool_call_arguments_parse_back_to_value() {
        let response = ChatResponse {
            id: "chatcmpl-1".into(),
            model: "gpt-4o-mini".into(),
            choices: vec![ApiChoice {
                message: ApiMessage {
                    role: "assistant".into(),
                    content: None,
                    tool_calls: Some(vec![ApiToolCall {
                        id: "call_1".into(),
                        type_: "function".into(),
                        function: ApiFunctionCall {
                            name: "book_cab".into(),
                            arguments: r#"{"pickupLocation":"Office"}"#.into(),
                        },
                    }]),
                    tool_call_id: None,
                },
                finish_reason: Some("tool_calls".into()),
            }],
            usage: None,
        };
        let resp = from_wire_response(response).unwrap();
        assert!(resp.wants_tools());
        assert_eq!(resp.tool_calls[0].arguments["pickupLocation"], "Office");
    }

    #[test]
    fn malformed_tool_arguments_are_a_provider_error() {
        let response = ChatResponse {
            id: "chatcmpl-2".into(),
            model: "gpt-4o-mini".into(),
            choices: vec![ApiChoice {
                message: ApiMessage {
                    role: "assistant".into(),
                    content: None,
                    tool_calls: Some(vec![ApiToolCall {
                        id: "call_1".into(),
                        type_: "function".into(),
                        function: ApiFunctionCall {
                            name: "book_cab".into(),
                            arguments: "{not json".into(),
                        },
                    }]),
                    tool_call_id: None,
                },
                finish_reason: None,
            }],
            usage: None,
        };
        assert!(from_wire_response(response).is_err());
    }

    #[test]
    fn empty_choices_is_a_provider_error() {
        let response = ChatResponse {
            id: "chatcmpl-3".into(),
            model: "gpt-4o-mini".into(),
            choices: vec![],
            usage: None,
        };
        assert!(from_wire_response(response).is_err());
    }
}
