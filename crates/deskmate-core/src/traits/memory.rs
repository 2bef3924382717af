// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory gateway trait for the external semantic memory service.

use async_trait::async_trait;

use crate::error::DeskmateError;
use crate::types::{ChatTurn, MemoryRecord};

/// Adapter for the long-term memory service.
///
/// Every operation is partitioned by `employee_id`; no call can read or
/// mutate another employee's memories. Callers treat the gateway as
/// best-effort: a failed add or search degrades the experience but must
/// never fail the surrounding chat turn.
#[async_trait]
pub trait MemoryGateway: Send + Sync {
    /// Stores a conversation fragment as memory for the employee.
    async fn add(
        &self,
        turns: &[ChatTurn],
        employee_id: &str,
        metadata: serde_json::Value,
    ) -> Result<(), DeskmateError>;

    /// Returns up to `limit` memories semantically relevant to `query`.
    async fn search(
        &self,
        query: &str,
        employee_id: &str,
        limit: usize,
    ) -> Result<Vec<MemoryRecord>, DeskmateError>;

    /// Returns all memories stored for the employee.
    async fn get_all(&self, employee_id: &str) -> Result<Vec<MemoryRecord>, DeskmateError>;

    /// Deletes a single memory by id.
    async fn delete(&self, memory_id: &str) -> Result<(), DeskmateError>;

    /// Deletes every memory belonging to the employee.
    async fn delete_all(&self, employee_id: &str) -> Result<(), DeskmateError>;
}
