//! Wire and result types for the scheduling API.
//!
//! Mock and live modes both produce the same `Envelope` payloads and flow
//! through the same mapping into the result structs below, so the two modes
//! cannot drift apart in shape.

use serde::{Deserialize, Serialize};

use slotline_core::{CancelOutcome, Cancellation, Confirmation, Note, Project, WorkingDay};

// ---------------------------------------------------------------------------
// Wire envelope
// ---------------------------------------------------------------------------

/// Standard response envelope of the scheduling API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

/// Raw project row from the dashboard endpoint. Field names mirror the
/// API's flattened `table_column` convention; only the fields we project
/// into [`Project`] are declared, the rest are ignored on deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProject {
    #[serde(default)]
    pub project_project_id: Option<String>,
    #[serde(default)]
    pub project_project_number: Option<String>,
    #[serde(default)]
    pub project_type_project_type: Option<String>,
    #[serde(default)]
    pub project_category_category: Option<String>,
    #[serde(default)]
    pub status_info_status: Option<String>,
    #[serde(default)]
    pub project_store_store_number: Option<String>,
    #[serde(default)]
    pub installation_address_full_address: Option<String>,
    #[serde(default)]
    pub project_date_scheduled_date: Option<String>,
}

impl RawProject {
    /// Simplify a raw row into the caller-facing projection.
    pub fn simplify(self, project_number: usize) -> Project {
        Project {
            project_number,
            project_id: self.project_project_id.unwrap_or_default(),
            order_number: self.project_project_number.unwrap_or_default(),
            project_type: self.project_type_project_type.unwrap_or_default(),
            category: self.project_category_category.unwrap_or_default(),
            status: self.status_info_status.unwrap_or_default(),
            store: self.project_store_store_number.unwrap_or_default(),
            address: self.installation_address_full_address.unwrap_or_default(),
            scheduled_date: self.project_date_scheduled_date,
        }
    }
}

/// Payload of the availability-check step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatesPayload {
    #[serde(default)]
    pub dates: Vec<String>,
    pub request_id: String,
}

/// Payload of the time-slots step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsPayload {
    #[serde(default)]
    pub slots: Vec<String>,
}

/// Payload of the business-hours endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkHoursPayload {
    #[serde(rename = "workHours", default)]
    pub work_hours: Vec<WorkingDay>,
}

/// Body posted to the schedule endpoint.
#[derive(Debug, Serialize)]
pub struct ConfirmRequest<'a> {
    pub created_at: String,
    pub date: &'a str,
    pub time: &'a str,
    pub request_id: &'a str,
    pub is_chatbot: &'a str,
}

/// Body posted to the add-note endpoint.
#[derive(Debug, Serialize)]
pub struct NoteRequest<'a> {
    pub project_id: &'a str,
    pub note: &'a str,
    pub author: &'a str,
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Normalized results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableDates {
    pub dates: Vec<String>,
    pub request_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlots {
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmResult {
    pub message: String,
    pub confirmation_data: Confirmation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelResult {
    pub message: String,
    pub cancellation_data: Cancellation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleResult {
    pub cancel_result: CancelOutcome,
    pub confirm_result: ConfirmResult,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingHours {
    pub work_hours: Vec<WorkingDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteResult {
    pub message: String,
    pub note: Note,
}
