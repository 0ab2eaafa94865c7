//! Session store trait and in-memory implementation.
//!
//! One logical conversation touches a session at a time; no compare-and-swap
//! is attempted and `request_id` updates are last-write-wins.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::types::{NewSession, Session};

/// Abstract interface for session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch a session by id. A miss is `Ok(None)`, never an error.
    async fn get(&self, session_id: &str) -> Result<Option<Session>>;

    /// Insert a new session record. `request_id` starts unset.
    async fn create(&self, session_id: &str, fields: NewSession) -> Result<Session>;

    /// Overwrite the stored correlation token. If the session no longer
    /// exists (TTL expiry race) this logs a warning and returns Ok; the
    /// downstream call will simply re-fail its request_id precondition.
    async fn update_request_id(&self, session_id: &str, request_id: &str) -> Result<()>;
}

/// Process-local session store. Entries live for the process lifetime.
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored sessions (used by tests and diagnostics).
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn create(&self, session_id: &str, fields: NewSession) -> Result<Session> {
        let session = Session::new(session_id, fields);
        info!(session_id, "Created session");
        self.sessions
            .write()
            .await
            .insert(session_id.to_string(), session.clone());
        Ok(session)
    }

    async fn update_request_id(&self, session_id: &str, request_id: &str) -> Result<()> {
        let mut w = self.sessions.write().await;
        match w.get_mut(session_id) {
            Some(session) => {
                session.request_id = Some(request_id.to_string());
                Ok(())
            }
            None => {
                warn!(session_id, "update_request_id on missing session; ignoring");
                Ok(())
            }
        }
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
            auth_token: "tok".into(),
        }
    }

    #[tokio::test]
    async fn get_miss_is_none() {
        let store = InMemorySessionStore::new();
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_then_get() {
        let store = InMemorySessionStore::new();
        store.create("s1", fields()).await.unwrap();
        let session = store.get("s1").await.unwrap().unwrap();
        assert_eq!(session.customer_id, "1645975");
        assert!(session.request_id.is_none());
    }

    #[tokio::test]
    async fn update_request_id_overwrites() {
        let store = InMemorySessionStore::new();
        store.create("s1", fields()).await.unwrap();
        store.update_request_id("s1", "REQ-1").await.unwrap();
        store.update_request_id("s1", "REQ-2").await.unwrap();
        let session = store.get("s1").await.unwrap().unwrap();
        assert_eq!(session.request_id.as_deref(), Some("REQ-2"));
    }

    #[tokio::test]
    async fn update_request_id_on_missing_session_is_ok() {
        let store = InMemorySessionStore::new();
        store.update_request_id("gone", "REQ-1").await.unwrap();
        assert!(store.get("gone").await.unwrap().is_none());
    }
}
