// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A completion provider that replays queued responses.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use deskmate_core::{
    CompletionProvider, CompletionRequest, CompletionResponse, DeskmateError, TokenUsage,
    ToolCallRequest,
};

/// Replays queued [`CompletionResponse`]s in order. When the queue runs dry
/// it falls back to a configured repeating response, or a plain text reply.
/// Every incoming request is recorded for assertions.
#[derive(Default)]
pub struct ScriptedProvider {
    queue: Mutex<VecDeque<CompletionResponse>>,
    repeat: Option<CompletionResponse>,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that answers every request with the same response.
    pub fn repeating(response: CompletionResponse) -> Self {
        Self {
            repeat: Some(response),
            ..Self::default()
        }
    }

    /// Queue the next response.
    pub fn push(&self, response: CompletionResponse) {
        self.queue.lock().unwrap().push_back(response);
    }

    /// Number of completion calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Everything sent to the provider, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// A plain assistant text response.
    pub fn text_response(content: &str) -> CompletionResponse {
        CompletionResponse {
            id: "scripted".to_string(),
            model: "scripted".to_string(),
            content: Some(content.to_string()),
            tool_calls: Vec::new(),
            finish_reason: Some("stop".to_string()),
            usage: TokenUsage::default(),
        }
    }

    /// A response asking for a single tool call.
    pub fn tool_call_response(call_id: &str, name: &str, arguments: serde_json::Value) -> CompletionResponse {
        CompletionResponse {
            id: "scripted".to_string(),
            model: "scripted".to_string(),
            content: None,
            tool_calls: vec![ToolCallRequest {
                id: call_id.to_string(),
                name: name.to_string(),
                arguments,
            }],
            finish_reason: Some("tool_calls".to_string()),
            usage: TokenUsage::default(),
        }
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, DeskmateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        if let Some(response) = self.queue.lock().unwrap().pop_front() {
            return Ok(response);
        }
        if let Some(response) = &self.repeat {
            return Ok(response.clone());
        }
        Ok(Self::text_response("OK."))
    }
}

/// A provider that always fails, for error-path tests.
pub struct FailingProvider;

#[async_trait]
impl CompletionProvider for FailingProvider {
    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<CompletionResponse, DeskmateError> {
        Err(DeskmateError::Provider {
            message: "scripted failure".to_string(),
            source: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_queue_then_falls_back() {
        let provider = ScriptedProvider::new();
        provider.push(ScriptedProvider::text_response("first"));

        let request = CompletionRequest {
            model: "m".to_string(),
            system: None,
            messages: Vec::new(),
            max_tokens: None,
            temperature: None,
            tools: Vec::new(),
            response_format: None,
        };

        let first = provider.complete(request.clone()).await.unwrap();
        assert_eq!(first.content.as_deref(), Some("first"));
        assert_eq!(first.usage.prompt_tokens, 0);
        assert_eq!(first.usage.completion_tokens, 0);

        let fallback = provider.complete(request).await.unwrap();
        assert_eq!(fallback.content.as_deref(), Some("OK."));
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn repeating_never_runs_dry() {
        let provider = ScriptedProvider::repeating(ScriptedProvider::tool_call_response(
            "call_1",
            "book_cab",
            serde_json::json!({}),
        ));

        let request = CompletionRequest {
            model: "m".to_string(),
            system: None,
            messages: Vec::new(),
            max_tokens: None,
            temperature: None,
            tools: Vec::new(),
            response_format: None,
        };

        for _ in 0..3 {
            let response = provider.complete(request.clone()).await.unwrap();
            assert!(response.wants_tools());
        }
        assert_eq!(provider.calls(), 3);
    }
}
