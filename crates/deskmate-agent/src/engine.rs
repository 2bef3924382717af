// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation turn orchestration.
//!
//! One call to [`ChatEngine::process_message`] runs a full turn: retrieve
//! memories and history, persist the user message, loop the completion
//! engine over tool calls (bounded), persist the reply, then classify and
//! store the exchange as a memory when warranted.

use std::sync::Arc;

use chrono::Utc;
use deskmate_core::{
    ChatTurn, CompletionProvider, CompletionRequest, DeskmateError, MemoryCategory, MemoryGateway,
};
use deskmate_storage::queries::{employees, messages, sessions};
use deskmate_storage::Database;
use deskmate_tools::ToolRegistry;

use crate::classifier::MemoryClassifier;
use crate::prompt::build_system_prompt;

/// Upper bound on completion/tool round-trips within a single turn. A model
/// still asking for tools after this many rounds is treated as runaway.
pub const MAX_TOOL_ROUNDS: usize = 5;

/// Where a turn currently is; surfaced in logs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
enum TurnPhase {
    RetrieveContext,
    AwaitCompletion,
    ToolCallsPending,
    Finalize,
    ClassifyAndStore,
}

/// Result of one completed turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub reply: String,
    pub session_id: i64,
    /// Category the exchange was stored under, if it was stored.
    pub memory_saved: Option<MemoryCategory>,
}

/// Tunables for the engine, normally taken from configuration.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub model: String,
    pub classifier_model: String,
    pub max_tokens: u32,
    pub history_limit: usize,
    pub memory_limit: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            classifier_model: "gpt-4o-mini".to_string(),
            max_tokens: 1024,
            history_limit: 10,
            memory_limit: 5,
        }
    }
}

pub struct ChatEngine {
    provider: Arc<dyn CompletionProvider>,
    memory: Arc<dyn MemoryGateway>,
    registry: Arc<ToolRegistry>,
    db: Database,
    classifier: MemoryClassifier,
    options: EngineOptions,
}

impl ChatEngine {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        memory: Arc<dyn MemoryGateway>,
        registry: Arc<ToolRegistry>,
        db: Database,
        options: EngineOptions,
    ) -> Self {
        let classifier = MemoryClassifier::new(provider.clone(), options.classifier_model.clone());
        Self {
            provider,
            memory,
            registry,
            db,
            classifier,
            options,
        }
    }

    /// Run one conversation turn for the employee.
    pub async fn process_message(
        &self,
        employee_id: &str,
        message: &str,
    ) -> Result<TurnOutcome, DeskmateError> {
        let employee = employees::get_employee(&self.db, employee_id)
            .await?
            .ok_or_else(|| DeskmateError::NotFound {
                entity: "employee",
                id: employee_id.to_string(),
            })?;

        let mut phase = TurnPhase::RetrieveContext;
        tracing::debug!(phase = %phase, employee_id = %employee_id, "turn started");

        // Memory retrieval is best-effort; the turn proceeds without it.
        let memories = match self
            .memory
            .search(message, employee_id, self.options.memory_limit)
            .await
        {
            Ok(memories) => memories,
            Err(error) => {
                tracing::warn!(error = %error, "memory search failed, continuing without memories");
                Vec::new()
            }
        };

        let history =
            messages::recent_messages(&self.db, employee_id, self.options.history_limit).await?;
        let session = match sessions::latest_session(&self.db, employee_id).await? {
            Some(session) => session,
            None => sessions::create_session(&self.db, employee_id).await?,
        };

        // Persist the user message before any provider call so a failed
        // turn still leaves the question in the transcript.
        messages::insert_message(&self.db, session.id, "user", message).await?;

        let today = Utc::now().format("%Y-%m-%d").to_string();
        let system = build_system_prompt(&employee, &memories, &today);

        let mut turns: Vec<ChatTurn> = history
            .iter()
            .map(|m| ChatTurn {
                role: m.role.clone(),
                content: Some(m.content.clone()),
                tool_calls: Vec::new(),
                tool_call_id: None,
            })
            .collect();
        turns.push(ChatTurn::user(message));

        let tools = self.registry.tool_specs();
        let mut rounds = 0usize;
        let reply = loop {
            phase = TurnPhase::AwaitCompletion;
            tracing::debug!(phase = %phase, rounds, "requesting completion");

            let response = self
                .provider
                .complete(CompletionRequest {
                    model: self.options.model.clone(),
                    system: Some(system.clone()),
                    messages: turns.clone(),
                    max_tokens: Some(self.options.max_tokens),
                    temperature: Some(0.7),
                    tools: tools.clone(),
                    response_format: None,
                })
                .await?;

            if !response.wants_tools() {
                break response.content.unwrap_or_default();
            }

            rounds += 1;
            if rounds > MAX_TOOL_ROUNDS {
                return Err(DeskmateError::Provider {
                    message: format!(
                        "model requested tools beyond the {MAX_TOOL_ROUNDS}-round limit"
                    ),
                    source: None,
                });
            }

            phase = TurnPhase::ToolCallsPending;
            tracing::debug!(phase = %phase, count = response.tool_calls.len(), "executing tool calls");

            turns.push(ChatTurn::assistant_tool_calls(
                response.content.clone(),
                response.tool_calls.clone(),
            ));
            for call in &response.tool_calls {
                tracing::info!(tool = %call.name, "executing tool");
                let output = self
                    .registry
                    .dispatch(&call.name, employee_id, call.arguments.clone())
                    .await;
                turns.push(ChatTurn::tool(&call.id, output.content));
            }
        };

        phase = TurnPhase::Finalize;
        tracing::debug!(phase = %phase, "persisting reply");
        messages::insert_message(&self.db, session.id, "assistant", &reply).await?;

        phase = TurnPhase::ClassifyAndStore;
        tracing::debug!(phase = %phase, "classifying exchange");
        let decision = self.classifier.classify(message, &reply).await;

        let memory_saved = if decision.should_store {
            let category = decision
                .category
                .unwrap_or(MemoryCategory::GeneralPreferences);
            let exchange = [ChatTurn::user(message), ChatTurn::assistant(reply.clone())];
            match self
                .memory
                .add(
                    &exchange,
                    employee_id,
                    serde_json::json!({ "category": category.to_string() }),
                )
                .await
            {
                Ok(()) => {
                    tracing::info!(category = %category, "memory stored");
                    Some(category)
                }
                Err(error) => {
                    tracing::warn!(error = %error, "memory store failed, reply unaffected");
                    None
                }
            }
        } else {
            None
        };

        Ok(TurnOutcome {
            reply,
            session_id: session.id,
            memory_saved,
        })
    }
}
