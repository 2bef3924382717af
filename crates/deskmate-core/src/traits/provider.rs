// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion provider trait for LLM backends.

use async_trait::async_trait;

use crate::error::DeskmateError;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for chat-completion backends.
///
/// Implementations handle authentication, retries, and wire-format
/// translation; callers work only in terms of [`CompletionRequest`] and
/// [`CompletionResponse`].
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends a completion request and returns the full response.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, DeskmateError>;
}
