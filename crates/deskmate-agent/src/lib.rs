// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation orchestration for the Deskmate assistant: system prompt
//! assembly, the bounded completion/tool loop, and post-turn memory
//! classification.

pub mod classifier;
pub mod engine;
pub mod prompt;

pub use classifier::{MemoryClassifier, MemoryDecision};
pub use engine::{ChatEngine, EngineOptions, TurnOutcome, MAX_TOOL_ROUNDS};
pub use prompt::build_system_prompt;
