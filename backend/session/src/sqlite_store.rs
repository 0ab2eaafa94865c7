//! SQLite-backed durable session store with a time-to-live.
//!
//! Sessions expire `ttl_secs` after creation. Expiry is enforced at read
//! time: an expired row is treated as a miss and purged lazily, so there is
//! no background reaper to coordinate with.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::store::SessionStore;
use crate::types::{NewSession, Session};

const DEFAULT_TTL_SECS: u64 = 86_400;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS sessions (
    session_id  TEXT PRIMARY KEY,
    customer_id TEXT NOT NULL,
    client_id   TEXT NOT NULL,
    client_name TEXT NOT NULL,
    auth_token  TEXT NOT NULL,
    request_id  TEXT,
    created_at  INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_sessions_created ON sessions(created_at);";

pub struct SqliteSessionStore {
    conn: Mutex<Connection>,
    ttl: Duration,
}

impl SqliteSessionStore {
    /// Create or open a session database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .context("Failed to open SQLite session database")?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .context("Failed to enable WAL mode")?;
        conn.execute_batch(SCHEMA)
            .context("Failed to initialize sessions schema")?;
        info!("SqliteSessionStore opened at {:?}", path.as_ref());
        Ok(Self {
            conn: Mutex::new(conn),
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
        })
    }

    /// Open an in-memory database (for tests).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
        })
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    fn row_to_session(row: &rusqlite::Row<'_>) -> rusqlite::Result<Session> {
        let created_ts: i64 = row.get(6)?;
        let created_at: DateTime<Utc> = Utc
            .timestamp_opt(created_ts, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Ok(Session {
            session_id: row.get(0)?,
            customer_id: row.get(1)?,
            client_id: row.get(2)?,
            client_name: row.get(3)?,
            auth_token: row.get(4)?,
            request_id: row.get(5)?,
            created_at,
        })
    }

    fn is_expired(&self, session: &Session) -> bool {
        let age = Utc::now().signed_duration_since(session.created_at);
        age.num_seconds() >= self.ttl.as_secs() as i64
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<Session>> {
        let conn = self.conn.lock().await;
        let session = conn
            .query_row(
                "SELECT session_id, customer_id, client_id, client_name, auth_token, request_id, created_at
                 FROM sessions WHERE session_id = ?1",
                params![session_id],
                Self::row_to_session,
            )
            .optional()
            .context("Failed to query session")?;

        match session {
            Some(s) if self.is_expired(&s) => {
                debug!(session_id, "Session expired; purging");
                conn.execute("DELETE FROM sessions WHERE session_id = ?1", params![session_id])?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn create(&self, session_id: &str, fields: NewSession) -> Result<Session> {
        let session = Session::new(session_id, fields);
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT OR REPLACE INTO sessions
             (session_id, customer_id, client_id, client_name, auth_token, request_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, NULL, ?6)",
            params![
                session.session_id,
                session.customer_id,
                session.client_id,
                session.client_name,
                session.auth_token,
                session.created_at.timestamp(),
            ],
        )
        .context("Failed to insert session")?;
        info!(session_id, "Created session");
        Ok(session)
    }

    async fn update_request_id(&self, session_id: &str, request_id: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        let updated = conn
            .execute(
                "UPDATE sessions SET request_id = ?2 WHERE session_id = ?1",
                params![session_id, request_id],
            )
            .context("Failed to update request_id")?;
        if updated == 0 {
            warn!(session_id, "update_request_id on missing session; ignoring");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> NewSession {
        NewSession {
            customer_id: "1645975".into(),
            client_id: "09PF05VD".into(),
            client_name: "testclient".into(),
            auth_token: String::new(),
        }
    }

    #[tokio::test]
    async fn create_get_roundtrip() {
        let store = SqliteSessionStore::in_memory().unwrap();
        store.create("s1", fields()).await.unwrap();
        let session = store.get("s1").await.unwrap().unwrap();
        assert_eq!(session.client_id, "09PF05VD");
        assert!(session.request_id.is_none());
    }

    #[tokio::test]
    async fn request_id_persists() {
        let store = SqliteSessionStore::in_memory().unwrap();
        store.create("s1", fields()).await.unwrap();
        store.update_request_id("s1", "REQ-12345-99").await.unwrap();
        let session = store.get("s1").await.unwrap().unwrap();
        assert_eq!(session.request_id.as_deref(), Some("REQ-12345-99"));
    }

    #[tokio::test]
    async fn expired_session_reads_as_miss() {
        let store = SqliteSessionStore::in_memory()
            .unwrap()
            .with_ttl(Duration::from_secs(0));
        store.create("s1", fields()).await.unwrap();
        assert!(store.get("s1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_after_expiry_is_silent() {
        let store = SqliteSessionStore::in_memory()
            .unwrap()
            .with_ttl(Duration::from_secs(0));
        store.create("s1", fields()).await.unwrap();
        assert!(store.get("s1").await.unwrap().is_none());
        store.update_request_id("s1", "REQ-1").await.unwrap();
    }
}
