// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat message CRUD operations.

use chrono::Utc;
use deskmate_core::DeskmateError;
use rusqlite::params;

use crate::database::Database;
use crate::models::ChatMessage;

/// Append a message to a session.
pub async fn insert_message(
    db: &Database,
    session_id: i64,
    role: &str,
    content: &str,
) -> Result<ChatMessage, DeskmateError> {
    let role = role.to_string();
    let content = content.to_string();
    let created_at = Utc::now().to_rfc3339();

    let insert_role = role.clone();
    let insert_content = content.clone();
    let insert_created_at = created_at.clone();
    let id = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO chat_messages (session_id, role, content, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![session_id, insert_role, insert_content, insert_created_at],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    Ok(ChatMessage {
        id,
        session_id,
        role,
        content,
        created_at,
    })
}

/// All messages in a session, oldest first.
pub async fn messages_for_session(
    db: &Database,
    session_id: i64,
) -> Result<Vec<ChatMessage>, DeskmateError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, session_id, role, content, created_at
                 FROM chat_messages WHERE session_id = ?1 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(params![session_id], |row| {
                Ok(ChatMessage {
                    id: row.get(0)?,
                    session_id: row.get(1)?,
                    role: row.get(2)?,
                    content: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?;
            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            Ok(messages)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The employee's most recent messages across all of their sessions,
/// oldest first after the limit is applied.
pub async fn recent_messages(
    db: &Database,
    employee_id: &str,
    limit: usize,
) -> Result<Vec<ChatMessage>, DeskmateError> {
    let employee_id = employee_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT m.id, m.session_id, m.role, m.content, m.created_at
                 FROM chat_messages m
                 JOIN chat_sessions s ON m.session_id = s.id
                 WHERE s.employee_id = ?1
                 ORDER BY m.id DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![employee_id, limit as i64], |row| {
                Ok(ChatMessage {
                    id: row.get(0)?,
                    session_id: row.get(1)?,
                    role: row.get(2)?,
                    content: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?;
            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            messages.reverse();
            Ok(messages)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
