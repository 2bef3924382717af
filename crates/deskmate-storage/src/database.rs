// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use deskmate_core::DeskmateError;
use tokio_rusqlite::Connection;

/// Handle to the SQLite database.
///
/// Cheap to clone; all clones share the same background connection thread.
#[derive(Clone, Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at the given path, configure PRAGMAs,
    /// and run any pending migrations.
    pub async fn open(path: &str) -> Result<Self, DeskmateError> {
        let conn = Connection::open(path).await.map_err(map_sqlite_err)?;
        conn.call(|conn| {
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.pragma_update(None, "busy_timeout", 5000)?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            // Migration failures are not rusqlite errors; carry them out
            // as the closure's value and rethrow on this side.
            Ok::<_, rusqlite::Error>(crate::migrations::run_migrations(conn))
        })
        .await
        .map_err(map_tr_err)??;

        tracing::debug!(path = %path, "database opened");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Flush and close the background connection.
    pub async fn close(self) -> Result<(), DeskmateError> {
        self.conn.close().await.map_err(map_tr_err)
    }
}

/// Map a tokio-rusqlite error into the crate error type.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> DeskmateError {
    DeskmateError::Storage {
        source: Box::new(e),
    }
}

/// Map a bare rusqlite error into the crate error type.
fn map_sqlite_err(e: rusqlite::Error) -> DeskmateError {
    DeskmateError::Storage {
        source: Box::new(e),
    }
}
