//! Session record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One customer's in-progress scheduling conversation.
///
/// Identity fields (`customer_id`, `client_id`, `client_name`, `auth_token`)
/// are set once at creation and never mutated. `request_id` is the
/// scheduling API's correlation token, issued by the availability-check step
/// and overwritten each time a new one is issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub customer_id: String,
    pub client_id: String,
    pub client_name: String,
    /// Credential forwarded to the scheduling API; empty in mock mode.
    pub auth_token: String,
    /// Absent until the first successful get_available_dates call.
    pub request_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Identity fields supplied when a session is first created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSession {
    pub customer_id: String,
    pub client_id: String,
    pub client_name: String,
    pub auth_token: String,
}

impl Session {
    pub fn new(session_id: impl Into<String>, fields: NewSession) -> Self {
        Self {
            session_id: session_id.into(),
            customer_id: fields.customer_id,
            client_id: fields.client_id,
            client_name: fields.client_name,
            auth_token: fields.auth_token,
            request_id: None,
            created_at: Utc::now(),
        }
    }
}
