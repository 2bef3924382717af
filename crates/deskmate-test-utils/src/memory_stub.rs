// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! An in-memory stand-in for the memory gateway.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use deskmate_core::{ChatTurn, DeskmateError, MemoryCategory, MemoryGateway, MemoryRecord};
use uuid::Uuid;

/// Stores memories per employee in a map. Can be switched into a failing
/// mode to exercise best-effort memory paths.
#[derive(Default)]
pub struct MemoryStub {
    store: DashMap<String, Vec<MemoryRecord>>,
    failing: AtomicBool,
}

impl MemoryStub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every gateway call fail from now on.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Seed a memory directly, bypassing `add`'s message formatting.
    pub fn seed(&self, employee_id: &str, text: &str, category: Option<MemoryCategory>) {
        self.store
            .entry(employee_id.to_string())
            .or_default()
            .push(MemoryRecord {
                id: Uuid::new_v4().to_string(),
                text: text.to_string(),
                category,
                created_at: Some(chrono::Utc::now().to_rfc3339()),
                score: None,
            });
    }

    pub fn records(&self, employee_id: &str) -> Vec<MemoryRecord> {
        self.store
            .get(employee_id)
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn check(&self) -> Result<(), DeskmateError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DeskmateError::Memory {
                message: "stub failure".to_string(),
                source: None,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MemoryGateway for MemoryStub {
    async fn add(
        &self,
        messages: &[ChatTurn],
        employee_id: &str,
        metadata: serde_json::Value,
    ) -> Result<(), DeskmateError> {
        self.check()?;
        let text = messages
            .iter()
            .filter_map(|m| m.content.clone())
            .collect::<Vec<_>>()
            .join("\n");
        let category = metadata
            .get("category")
            .and_then(|v| v.as_str())
            .map(MemoryCategory::parse_lossy);
        self.seed(employee_id, &text, category);
        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        employee_id: &str,
        limit: usize,
    ) -> Result<Vec<MemoryRecord>, DeskmateError> {
        self.check()?;
        let _ = query;
        Ok(self
            .records(employee_id)
            .into_iter()
            .take(limit)
            .collect())
    }

    async fn get_all(&self, employee_id: &str) -> Result<Vec<MemoryRecord>, DeskmateError> {
        self.check()?;
        Ok(self.records(employee_id))
    }

    async fn delete(&self, memory_id: &str) -> Result<(), DeskmateError> {
        self.check()?;
        for mut entry in self.store.iter_mut() {
            entry.value_mut().retain(|r| r.id != memory_id);
        }
        Ok(())
    }

    async fn delete_all(&self, employee_id: &str) -> Result<(), DeskmateError> {
        self.check()?;
        self.store.remove(employee_id);
        Ok(())
    }
}
