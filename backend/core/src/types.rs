//! Shared domain types for scheduling actions.
//!
//! These are the normalized shapes returned to callers; the scheduling API's
//! raw wire rows live in `slotline-client` and are mapped into these.

use serde::{Deserialize, Serialize};

/// A customer project eligible for scheduling, simplified from the
/// dashboard API's flat row format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// 1-based position in the listing, for conversational reference.
    pub project_number: usize,
    pub project_id: String,
    pub order_number: String,
    pub project_type: String,
    pub category: String,
    pub status: String,
    pub store: String,
    pub address: String,
    /// Set only when an appointment is already on the books.
    pub scheduled_date: Option<String>,
}

/// Result of a confirm-appointment call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Confirmation {
    pub project_id: String,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub request_id: String,
    pub confirmation_number: String,
}

/// Result of a cancel-appointment call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cancellation {
    pub project_id: String,
    pub cancelled_at: String,
    pub cancellation_id: String,
}

/// Outcome of the best-effort cancel leg inside a reschedule.
///
/// `status` is `"success"` when the cancel went through and `"skipped"` when
/// it failed; rescheduling a never-confirmed appointment is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelOutcome {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CancelOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self { status: "success".to_string(), message: Some(message.into()), reason: None }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self { status: "skipped".to_string(), message: None, reason: Some(reason.into()) }
    }
}

/// One day in the tenant's weekly business-hours table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingDay {
    pub day: String,
    pub is_working: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// A note attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub note_id: String,
    pub project_id: String,
    pub note_text: String,
    pub author: String,
    pub created_at: String,
}
