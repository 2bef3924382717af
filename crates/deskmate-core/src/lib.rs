// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Deskmate employee assistant.
//!
//! This crate provides the foundational trait definitions, error type, and
//! common types used throughout the Deskmate workspace. The provider,
//! memory, storage, and agent crates all build on what is defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::DeskmateError;
pub use traits::{CompletionProvider, MemoryGateway};
pub use types::{
    ChatMessage, ChatSession, ChatTurn, CompletionRequest, CompletionResponse, Employee,
    MemoryCategory, MemoryRecord, ResponseFormat, TokenUsage, ToolCallRequest, ToolSpec,
};
