// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat session CRUD operations.

use chrono::Utc;
use deskmate_core::DeskmateError;
use rusqlite::params;

use crate::database::Database;
use crate::models::ChatSession;

/// Create a new chat session for the employee.
pub async fn create_session(
    db: &Database,
    employee_id: &str,
) -> Result<ChatSession, DeskmateError> {
    let employee_id = employee_id.to_string();
    let created_at = Utc::now().to_rfc3339();
    let insert_created_at = created_at.clone();
    let insert_employee_id = employee_id.clone();

    let id = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO chat_sessions (employee_id, created_at) VALUES (?1, ?2)",
                params![insert_employee_id, insert_created_at],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    Ok(ChatSession {
        id,
        employee_id,
        created_at,
    })
}

/// Get a session by its rowid.
pub async fn get_session(db: &Database, id: i64) -> Result<Option<ChatSession>, DeskmateError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, employee_id, created_at FROM chat_sessions WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], |row| {
                Ok(ChatSession {
                    id: row.get(0)?,
                    employee_id: row.get(1)?,
                    created_at: row.get(2)?,
                })
            });
            match result {
                Ok(session) => Ok(Some(session)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The employee's most recently created session, if any.
pub async fn latest_session(
    db: &Database,
    employee_id: &str,
) -> Result<Option<ChatSession>, DeskmateError> {
    let employee_id = employee_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, employee_id, created_at FROM chat_sessions
                 WHERE employee_id = ?1 ORDER BY id DESC LIMIT 1",
            )?;
            let result = stmt.query_row(params![employee_id], |row| {
                Ok(ChatSession {
                    id: row.get(0)?,
                    employee_id: row.get(1)?,
                    created_at: row.get(2)?,
                })
            });
            match result {
                Ok(session) => Ok(Some(session)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}
