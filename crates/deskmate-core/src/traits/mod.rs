// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits implemented by the provider and memory crates.

pub mod memory;
pub mod provider;

pub use memory::MemoryGateway;
pub use provider::CompletionProvider;
