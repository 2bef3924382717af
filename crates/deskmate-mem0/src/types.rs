// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the mem0 REST API.

use deskmate_core::types::{MemoryCategory, MemoryRecord};
use serde::{Deserialize, Serialize};

/// A message in the mem0 wire format.
#[derive(Debug, Clone, Serialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

/// Request body for POST /v1/memories/.
#[derive(Debug, Clone, Serialize)]
pub struct AddRequest {
    pub messages: Vec<WireMessage>,
    pub user_id: String,
    pub metadata: serde_json::Value,
}

/// Request body for POST /v1/memories/search/.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub user_id: String,
    pub limit: usize,
}

/// A memory as returned by the mem0 API.
#[derive(Debug, Clone, Deserialize)]
pub struct WireMemory {
    pub id: String,
    /// The memory text. mem0 calls this field `memory`.
    pub memory: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl WireMemory {
    /// Converts the wire memory into the canonical record, pulling the
    /// category out of metadata when present.
    pub fn into_record(self) -> MemoryRecord {
        let category = self
            .metadata
            .as_ref()
            .and_then(|m| m.get("category"))
            .and_then(|c| c.as_str())
            .map(MemoryCategory::parse_lossy);
        MemoryRecord {
            id: self.id,
            text: self.memory,
            category,
            created_at: self.created_at,
            score: self.score,
        }
    }
}
