// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles shared across Deskmate crates: a scripted completion
//! provider and an in-memory memory gateway stub.

pub mod memory_stub;
pub mod scripted_provider;

pub use memory_stub::MemoryStub;
pub use scripted_provider::{FailingProvider, ScriptedProvider};
