// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Covers the /health, /api/employees, /api/chat, and /api/memories
//! surfaces. Error bodies are always JSON objects with an `error` field.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use deskmate_core::{ChatTurn, DeskmateError, Employee};
use deskmate_storage::queries::{employees, messages, sessions};
use serde::{Deserialize, Serialize};

use crate::server::GatewayState;

/// Request body for POST /api/employees.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

/// Request body for PUT /api/employees/{employee_id}.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

/// Request body for POST /api/chat.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Query parameters for GET /api/chat/history/{employee_id}.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Request body for POST /api/chat/new-session.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionRequest {
    #[serde(default)]
    pub employee_id: Option<String>,
}

/// Request body for POST /api/memories/{employee_id}/search.
#[derive(Debug, Deserialize)]
pub struct MemorySearchRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_secs: u64,
}

fn error_body(status: StatusCode, body: serde_json::Value) -> Response {
    (status, Json(body)).into_response()
}

fn internal_error(error: &DeskmateError, message: &str) -> Response {
    tracing::error!(error = %error, "{message}");
    error_body(
        StatusCode::INTERNAL_SERVER_ERROR,
        serde_json::json!({ "error": message }),
    )
}

/// Looks up the employee or produces the canonical 404 body.
async fn require_employee(state: &GatewayState, employee_id: &str) -> Result<Employee, Response> {
    match employees::get_employee(&state.db, employee_id).await {
        Ok(Some(employee)) => Ok(employee),
        Ok(None) => Err(error_body(
            StatusCode::NOT_FOUND,
            serde_json::json!({ "error": "Employee not found", "employeeId": employee_id }),
        )),
        Err(error) => Err(internal_error(&error, "Failed to fetch employee")),
    }
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Response {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
    .into_response()
}

/// POST /api/employees
pub async fn register_employee(
    State(state): State<GatewayState>,
    Json(body): Json<RegisterRequest>,
) -> Response {
    let (Some(employee_id), Some(name), Some(email)) = (body.employee_id, body.name, body.email)
    else {
        return error_body(
            StatusCode::BAD_REQUEST,
            serde_json::json!({
                "error": "Missing required fields",
                "required": ["employeeId", "name", "email"],
            }),
        );
    };

    match employees::get_employee(&state.db, &employee_id).await {
        Ok(Some(existing)) => {
            return error_body(
                StatusCode::CONFLICT,
                serde_json::json!({
                    "error": "Employee with this ID already exists",
                    "employee": existing,
                }),
            );
        }
        Ok(None) => {}
        Err(error) => return internal_error(&error, "Failed to register employee"),
    }

    let employee = match employees::create_employee(
        &state.db,
        &employee_id,
        &name,
        &email,
        body.department.as_deref(),
    )
    .await
    {
        Ok(employee) => employee,
        Err(error) => return internal_error(&error, "Failed to register employee"),
    };

    // Seed the profile memory; registration succeeds regardless.
    let profile = ChatTurn {
        role: "system".to_string(),
        content: Some(format!(
            "New employee registered: {name} (ID: {employee_id}), Email: {email}, Department: {}",
            employee.department.as_deref().unwrap_or("Not specified"),
        )),
        tool_calls: Vec::new(),
        tool_call_id: None,
    };
    if let Err(error) = state
        .memory
        .add(
            &[profile],
            &employee_id,
            serde_json::json!({ "type": "profile", "action": "registration" }),
        )
        .await
    {
        tracing::warn!(error = %error, "failed to seed profile memory");
    }

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Employee registered successfully",
            "employee": employee,
        })),
    )
        .into_response()
}

/// GET /api/employees
pub async fn list_employees(State(state): State<GatewayState>) -> Response {
    match employees::list_employees(&state.db).await {
        Ok(employees) => Json(serde_json::json!({ "employees": employees })).into_response(),
        Err(error) => internal_error(&error, "Failed to fetch employees"),
    }
}

/// GET /api/employees/{employee_id}
pub async fn get_employee(
    State(state): State<GatewayState>,
    Path(employee_id): Path<String>,
) -> Response {
    match require_employee(&state, &employee_id).await {
        Ok(employee) => Json(serde_json::json!({ "employee": employee })).into_response(),
        Err(response) => response,
    }
}

/// PUT /api/employees/{employee_id}
pub async fn update_employee(
    State(state): State<GatewayState>,
    Path(employee_id): Path<String>,
    Json(body): Json<UpdateRequest>,
) -> Response {
    if let Err(response) = require_employee(&state, &employee_id).await {
        return response;
    }

    match employees::update_employee(
        &state.db,
        &employee_id,
        body.name.as_deref(),
        body.email.as_deref(),
        body.department.as_deref(),
    )
    .await
    {
        Ok(Some(employee)) => Json(serde_json::json!({
            "message": "Employee updated successfully",
            "employee": employee,
        }))
        .into_response(),
        Ok(None) => error_body(
            StatusCode::NOT_FOUND,
            serde_json::json!({ "error": "Employee not found", "employeeId": employee_id }),
        ),
        Err(error) => internal_error(&error, "Failed to update employee"),
    }
}

/// POST /api/chat
pub async fn post_chat(
    State(state): State<GatewayState>,
    Json(body): Json<ChatRequest>,
) -> Response {
    let (Some(employee_id), Some(message)) = (body.employee_id, body.message) else {
        return error_body(
            StatusCode::BAD_REQUEST,
            serde_json::json!({
                "error": "Missing required fields",
                "required": ["employeeId", "message"],
            }),
        );
    };

    match state.engine.process_message(&employee_id, &message).await {
        Ok(outcome) => {
            let memory_saved = outcome
                .memory_saved
                .map(|category| serde_json::json!({ "category": category.to_string() }))
                .unwrap_or(serde_json::Value::Null);
            Json(serde_json::json!({
                "message": outcome.reply,
                "sessionId": outcome.session_id,
                "memorySaved": memory_saved,
            }))
            .into_response()
        }
        Err(DeskmateError::NotFound { .. }) => error_body(
            StatusCode::NOT_FOUND,
            serde_json::json!({ "error": "Employee not found", "employeeId": employee_id }),
        ),
        Err(error) => internal_error(&error, "Failed to process message"),
    }
}

/// GET /api/chat/history/{employee_id}
pub async fn get_chat_history(
    State(state): State<GatewayState>,
    Path(employee_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Response {
    if let Err(response) = require_employee(&state, &employee_id).await {
        return response;
    }

    let session = match sessions::latest_session(&state.db, &employee_id).await {
        Ok(Some(session)) => session,
        Ok(None) => return Json(serde_json::json!({ "messages": [] })).into_response(),
        Err(error) => return internal_error(&error, "Failed to fetch chat history"),
    };

    match messages::messages_for_session(&state.db, session.id).await {
        Ok(all) => {
            let limit = query.limit.unwrap_or(50);
            let messages: Vec<serde_json::Value> = all
                .into_iter()
                .take(limit)
                .map(|m| {
                    serde_json::json!({
                        "id": m.id,
                        "role": m.role,
                        "content": m.content,
                        "timestamp": m.created_at,
                    })
                })
                .collect();
            Json(serde_json::json!({ "sessionId": session.id, "messages": messages }))
                .into_response()
        }
        Err(error) => internal_error(&error, "Failed to fetch chat history"),
    }
}

/// POST /api/chat/new-session
pub async fn new_session(
    State(state): State<GatewayState>,
    Json(body): Json<NewSessionRequest>,
) -> Response {
    let Some(employee_id) = body.employee_id else {
        return error_body(
            StatusCode::BAD_REQUEST,
            serde_json::json!({ "error": "employeeId is required" }),
        );
    };

    if let Err(response) = require_employee(&state, &employee_id).await {
        return response;
    }

    match sessions::create_session(&state.db, &employee_id).await {
        Ok(session) => Json(serde_json::json!({
            "message": "New chat session created",
            "sessionId": session.id,
        }))
        .into_response(),
        Err(error) => internal_error(&error, "Failed to create new session"),
    }
}

/// GET /api/memories/{employee_id}
pub async fn get_memories(
    State(state): State<GatewayState>,
    Path(employee_id): Path<String>,
) -> Response {
    let employee = match require_employee(&state, &employee_id).await {
        Ok(employee) => employee,
        Err(response) => return response,
    };

    match state.memory.get_all(&employee_id).await {
        Ok(memories) => Json(serde_json::json!({
            "employeeId": employee_id,
            "employeeName": employee.name,
            "count": memories.len(),
            "memories": memories,
        }))
        .into_response(),
        Err(error) => internal_error(&error, "Failed to fetch memories"),
    }
}

/// POST /api/memories/{employee_id}/search
pub async fn search_memories(
    State(state): State<GatewayState>,
    Path(employee_id): Path<String>,
    Json(body): Json<MemorySearchRequest>,
) -> Response {
    let Some(query) = body.query else {
        return error_body(
            StatusCode::BAD_REQUEST,
            serde_json::json!({ "error": "Search query is required" }),
        );
    };

    if let Err(response) = require_employee(&state, &employee_id).await {
        return response;
    }

    match state
        .memory
        .search(&query, &employee_id, body.limit.unwrap_or(5))
        .await
    {
        Ok(memories) => Json(serde_json::json!({
            "employeeId": employee_id,
            "query": query,
            "count": memories.len(),
            "memories": memories,
        }))
        .into_response(),
        Err(error) => internal_error(&error, "Failed to search memories"),
    }
}

/// DELETE /api/memories/{employee_id}/{memory_id}
pub async fn delete_memory(
    State(state): State<GatewayState>,
    Path((employee_id, memory_id)): Path<(String, String)>,
) -> Response {
    if let Err(response) = require_employee(&state, &employee_id).await {
        return response;
    }

    match state.memory.delete(&memory_id).await {
        Ok(()) => Json(serde_json::json!({
            "message": "Memory deleted successfully",
            "memoryId": memory_id,
        }))
        .into_response(),
        Err(error) => internal_error(&error, "Failed to delete memory"),
    }
}

/// DELETE /api/memories/{employee_id}
pub async fn delete_all_memories(
    State(state): State<GatewayState>,
    Path(employee_id): Path<String>,
) -> Response {
    if let Err(response) = require_employee(&state, &employee_id).await {
        return response;
    }

    match state.memory.delete_all(&employee_id).await {
        Ok(()) => Json(serde_json::json!({
            "message": "All memories deleted successfully",
            "employeeId": employee_id,
        }))
        .into_response(),
        Err(error) => internal_error(&error, "Failed to delete memories"),
    }
}
