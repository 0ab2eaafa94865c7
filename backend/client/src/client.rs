//! Session-bound scheduling API client.
//!
//! One client is constructed per inbound action, bound to the resolved
//! session. The multi-step booking workflow (dates → slots → confirm) is
//! chained through the API's `request_id` correlation token: the
//! availability-check step stores the token it receives into the session,
//! and later steps resolve it explicit-parameter-first, then from the
//! session. Validation always happens before any network call.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use slotline_core::{
    validate, CancelOutcome, Cancellation, Confirmation, Note, Project, SlotError,
};
use slotline_session::{Session, SessionStore};

use crate::mock;
use crate::types::{
    AvailableDates, CancelResult, ConfirmRequest, ConfirmResult, DatesPayload, Envelope,
    NoteRequest, NoteResult, RawProject, RescheduleResult, SlotsPayload, TimeSlots,
    WorkHoursPayload, WorkingHours,
};

pub const DEFAULT_BASE_URL: &str = "https://api.projectsforce.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Whole-client mode switch: fixtures or live HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMode {
    Mock,
    Live,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub mode: ApiMode,
    /// Rollout guards: even in live mode, the write steps (confirm/cancel)
    /// keep using fixtures until explicitly enabled.
    pub enable_real_confirm: bool,
    pub enable_real_cancel: bool,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            mode: ApiMode::Mock,
            enable_real_confirm: false,
            enable_real_cancel: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Scheduling API client bound to one session.
pub struct SchedulerClient {
    http: Client,
    config: ClientConfig,
    session: Session,
    store: Arc<dyn SessionStore>,
}

impl SchedulerClient {
    pub fn new(
        http: Client,
        config: ClientConfig,
        session: Session,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self { http, config, session, store }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_mock(&self) -> bool {
        self.config.mode == ApiMode::Mock
    }

    /// Whether the confirm step will use fixtures (mock mode, or the real
    /// write not yet enabled).
    pub fn confirm_uses_mock(&self) -> bool {
        self.is_mock() || !self.config.enable_real_confirm
    }

    /// Whether the cancel step will use fixtures.
    pub fn cancel_uses_mock(&self) -> bool {
        self.is_mock() || !self.config.enable_real_cancel
    }

    // -----------------------------------------------------------------------
    // URL / transport helpers
    // -----------------------------------------------------------------------

    fn scheduler_url(&self, tail: &str) -> String {
        format!(
            "{}/scheduler/client/{}/{}",
            self.config.base_url, self.session.client_id, tail
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Envelope<T>, SlotError> {
        let res = self
            .http
            .get(url)
            .header("authorization", &self.session.auth_token)
            .header("client_id", &self.session.client_id)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(api_err)?
            .error_for_status()
            .map_err(api_err)?;
        res.json().await.map_err(api_err)
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Envelope<T>, SlotError> {
        let res = self
            .http
            .post(url)
            .header("authorization", &self.session.auth_token)
            .header("client_id", &self.session.client_id)
            .timeout(self.config.timeout)
            .json(body)
            .send()
            .await
            .map_err(api_err)?
            .error_for_status()
            .map_err(api_err)?;
        res.json().await.map_err(api_err)
    }

    /// Resolve the correlation token for steps that require one:
    /// explicit caller value first, then the bound session.
    fn resolve_request_id(&self, explicit: Option<&str>) -> Result<String, SlotError> {
        explicit
            .map(str::to_string)
            .or_else(|| self.session.request_id.clone())
            .ok_or_else(|| {
                SlotError::Validation(
                    "request_id is required. Call get_available_dates first.".to_string(),
                )
            })
    }

    // -----------------------------------------------------------------------
    // Scheduling steps
    // -----------------------------------------------------------------------

    /// List the customer's projects, simplified to the caller-facing shape.
    pub async fn list_projects(&self, customer_id: &str) -> Result<Vec<Project>, SlotError> {
        let customer_id = validate::customer_id(customer_id)?;

        let envelope: Envelope<Vec<RawProject>> = if self.is_mock() {
            info!(customer_id, "[MOCK] Fetching projects");
            mock::projects(&customer_id)
        } else {
            info!(customer_id, "Fetching projects");
            let url = format!(
                "{}/dashboard/get/{}/{}",
                self.config.base_url, self.session.client_id, customer_id
            );
            self.get_json(&url).await?
        };

        Ok(envelope
            .data
            .into_iter()
            .enumerate()
            .map(|(i, raw)| raw.simplify(i + 1))
            .collect())
    }

    /// Availability-check step. On success the returned `request_id` is
    /// written through to the session store before returning.
    pub async fn get_available_dates(
        &mut self,
        project_id: &str,
    ) -> Result<AvailableDates, SlotError> {
        let project_id = validate::project_id(project_id)?;

        let envelope: Envelope<DatesPayload> = if self.is_mock() {
            info!(project_id, "[MOCK] Fetching available dates");
            mock::available_dates(&project_id)
        } else {
            info!(project_id, "Fetching available dates");
            let today = Local::now().format("%Y-%m-%d").to_string();
            let url = self.scheduler_url(&format!(
                "project/{project_id}/date/{today}/selected/{today}/get-rescheduler-slots"
            ));
            self.get_json(&url).await?
        };

        let request_id = envelope.data.request_id.clone();
        self.store
            .update_request_id(&self.session.session_id, &request_id)
            .await
            .map_err(|e| SlotError::Storage(e.to_string()))?;
        self.session.request_id = Some(request_id.clone());
        info!(request_id, "Stored request_id in session");

        Ok(AvailableDates { dates: envelope.data.dates, request_id })
    }

    /// Time-slots step; requires a resolved `request_id`.
    pub async fn get_time_slots(
        &self,
        project_id: &str,
        date: &str,
        request_id: Option<&str>,
    ) -> Result<TimeSlots, SlotError> {
        let project_id = validate::project_id(project_id)?;
        let date = validate::date(date)?;
        let request_id = self.resolve_request_id(request_id)?;

        let envelope: Envelope<SlotsPayload> = if self.is_mock() {
            info!(project_id, date, "[MOCK] Fetching time slots");
            mock::time_slots(&project_id, &date)
        } else {
            info!(project_id, date, "Fetching time slots");
            let url = self.scheduler_url(&format!(
                "project/{project_id}/date/{date}/selected/{date}/get-rescheduler-slots?request_id={request_id}"
            ));
            self.get_json(&url).await?
        };

        Ok(TimeSlots { slots: envelope.data.slots })
    }

    /// Confirm/schedule an appointment; requires a resolved `request_id`.
    pub async fn confirm_appointment(
        &self,
        project_id: &str,
        date: &str,
        time: &str,
        request_id: Option<&str>,
    ) -> Result<ConfirmResult, SlotError> {
        let project_id = validate::project_id(project_id)?;
        let date = validate::date(date)?;
        let time = validate::time(time)?;
        let request_id = self.resolve_request_id(request_id)?;

        let envelope: Envelope<Confirmation> = if self.confirm_uses_mock() {
            info!(project_id, date, time, "[MOCK] Confirming appointment");
            mock::confirm_appointment(&project_id, &date, &time, &request_id)
        } else {
            info!(project_id, date, time, "Confirming appointment");
            let url = self.scheduler_url(&format!("project/{project_id}/schedule"));
            let body = ConfirmRequest {
                created_at: Local::now().format("%m-%d-%Y %H:%M:%S").to_string(),
                date: &date,
                time: &time,
                request_id: &request_id,
                is_chatbot: "true",
            };
            self.post_json(&url, &body).await?
        };

        Ok(ConfirmResult {
            message: envelope.message.unwrap_or_else(|| "Appointment confirmed".to_string()),
            confirmation_data: envelope.data,
        })
    }

    /// Cancel an existing appointment. No `request_id` needed.
    pub async fn cancel_appointment(&self, project_id: &str) -> Result<CancelResult, SlotError> {
        let project_id = validate::project_id(project_id)?;

        let envelope: Envelope<Cancellation> = if self.cancel_uses_mock() {
            info!(project_id, "[MOCK] Cancelling appointment");
            mock::cancel_appointment(&project_id)
        } else {
            info!(project_id, "Cancelling appointment");
            let url = self.scheduler_url(&format!("project/{project_id}/cancel-reschedule"));
            self.get_json(&url).await?
        };

        Ok(CancelResult {
            message: envelope.message.unwrap_or_else(|| "Appointment cancelled".to_string()),
            cancellation_data: envelope.data,
        })
    }

    /// Reschedule = best-effort cancel, then confirm.
    ///
    /// The cancel leg is swallowed into a `"skipped"` outcome on failure;
    /// rescheduling a never-confirmed appointment must still book the new
    /// slot. A confirm failure propagates.
    pub async fn reschedule_appointment(
        &self,
        project_id: &str,
        new_date: &str,
        new_time: &str,
        request_id: Option<&str>,
    ) -> Result<RescheduleResult, SlotError> {
        let project_id = validate::project_id(project_id)?;
        let new_date = validate::date(new_date)?;
        let new_time = validate::time(new_time)?;
        let request_id = self.resolve_request_id(request_id)?;

        info!(project_id, "Rescheduling appointment");

        let cancel_result = match self.cancel_appointment(&project_id).await {
            Ok(res) => CancelOutcome::success(res.message),
            Err(e) => {
                warn!(project_id, error = %e, "Cancel failed (may not have an existing appointment)");
                CancelOutcome::skipped(e.to_string())
            }
        };

        let confirm_result = self
            .confirm_appointment(&project_id, &new_date, &new_time, Some(&request_id))
            .await?;

        Ok(RescheduleResult {
            cancel_result,
            confirm_result,
            message: format!("Appointment rescheduled to {new_date} at {new_time}"),
        })
    }

    /// Weekly business hours for the session's tenant.
    pub async fn get_working_hours(&self) -> Result<WorkingHours, SlotError> {
        let envelope: Envelope<WorkHoursPayload> = if self.is_mock() {
            info!(client_id = %self.session.client_id, "[MOCK] Fetching working hours");
            mock::working_hours(&self.session.client_id)
        } else {
            info!(client_id = %self.session.client_id, "Fetching working hours");
            let url = self.scheduler_url("business-hours");
            self.get_json(&url).await?
        };

        Ok(WorkingHours { work_hours: envelope.data.work_hours })
    }

    /// Attach a free-text note to a project.
    pub async fn add_note(
        &self,
        project_id: &str,
        note_text: &str,
        author: Option<&str>,
    ) -> Result<NoteResult, SlotError> {
        let project_id = validate::project_id(project_id)?;
        if note_text.trim().is_empty() {
            return Err(SlotError::Validation("note_text must not be empty".into()));
        }
        let author = author.unwrap_or("Agent");

        let envelope: Envelope<Note> = if self.is_mock() {
            info!(project_id, "[MOCK] Adding note");
            mock::add_note(&project_id, note_text, author)
        } else {
            info!(project_id, "Adding note");
            let url = format!(
                "{}/project-notes/add/{}",
                self.config.base_url, self.session.client_id
            );
            let body = NoteRequest {
                project_id: &project_id,
                note: note_text,
                author,
                created_at: Local::now().format("%m-%d-%Y %H:%M:%S").to_string(),
            };
            self.post_json(&url, &body).await?
        };

        Ok(NoteResult {
            message: envelope.message.unwrap_or_else(|| "Note added".to_string()),
            note: envelope.data,
        })
    }
}

fn api_err(e: reqwest::Error) -> SlotError {
    SlotError::ApiRequest(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotline_session::{InMemorySessionStore, NewSession};

    async fn mock_client(store: Arc<dyn SessionStore>) -> SchedulerClient {
        let session = store
            .create(
                "test-session",
                NewSession {
                    customer_id: "1645975".into(),
                    client_id: "09PF05VD".into(),
                    client_name: "testclient".into(),
                    auth_token: String::new(),
                },
            )
            .await
            .unwrap();
        SchedulerClient::new(Client::new(), ClientConfig::default(), session, store)
    }

    #[tokio::test]
    async fn request_id_is_chained_between_calls() {
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let mut client = mock_client(Arc::clone(&store)).await;

        let dates = client.get_available_dates("12345").await.unwrap();
        assert!(!dates.dates.is_empty());

        // Stored in both the bound session and the backing store.
        assert_eq!(client.session().request_id.as_deref(), Some(dates.request_id.as_str()));
        let persisted = store.get("test-session").await.unwrap().unwrap();
        assert_eq!(persisted.request_id.as_deref(), Some(dates.request_id.as_str()));

        // Slot lookup with no explicit request_id uses the chained one.
        let slots = client.get_time_slots("12345", "2025-10-15", None).await.unwrap();
        assert!(slots.slots.contains(&"10:00 AM".to_string()));
    }

    #[tokio::test]
    async fn slots_without_request_id_fail_validation() {
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let client = mock_client(store).await;
        let err = client.get_time_slots("12345", "2025-10-15", None).await.unwrap_err();
        assert!(matches!(err, SlotError::Validation(_)));
        assert!(err.to_string().contains("get_available_dates"));
    }

    #[tokio::test]
    async fn confirm_without_request_id_fails_validation() {
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let client = mock_client(store).await;
        let err = client
            .confirm_appointment("12345", "2025-10-15", "10:00 AM", None)
            .await
            .unwrap_err();
        assert!(matches!(err, SlotError::Validation(_)));
    }

    #[tokio::test]
    async fn reschedule_without_request_id_fails_validation() {
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let client = mock_client(store).await;
        let err = client
            .reschedule_appointment("12345", "2025-10-16", "09:00 AM", None)
            .await
            .unwrap_err();
        assert!(matches!(err, SlotError::Validation(_)));
    }

    #[tokio::test]
    async fn explicit_request_id_overrides_session() {
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let client = mock_client(store).await;
        // No prior dates call, but an explicit token satisfies the precondition.
        let slots = client
            .get_time_slots("12345", "2025-10-15", Some("REQ-12345-7"))
            .await
            .unwrap();
        assert!(!slots.slots.is_empty());
    }

    #[tokio::test]
    async fn validation_rejects_before_any_call() {
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let client = mock_client(store).await;
        assert!(matches!(
            client.list_projects("").await.unwrap_err(),
            SlotError::Validation(_)
        ));
        assert!(matches!(
            client.get_time_slots("12345", "15/10/2025", Some("R")).await.unwrap_err(),
            SlotError::Validation(_)
        ));
        assert!(matches!(
            client
                .confirm_appointment("12345", "2025-10-15", "25:00", Some("R"))
                .await
                .unwrap_err(),
            SlotError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn full_mock_booking_flow() {
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let mut client = mock_client(store).await;

        let projects = client.list_projects("1645975").await.unwrap();
        assert!(projects.iter().any(|p| p.project_id == "12345"));

        let dates = client.get_available_dates("12345").await.unwrap();
        let slots = client
            .get_time_slots("12345", "2025-10-15", Some(&dates.request_id))
            .await
            .unwrap();
        assert!(slots.slots.contains(&"10:00 AM".to_string()));

        let confirm = client
            .confirm_appointment("12345", "2025-10-15", "10:00 AM", Some(&dates.request_id))
            .await
            .unwrap();
        assert!(confirm.confirmation_data.confirmation_number.starts_with("CONF-"));
        assert!(confirm.message.contains("2025-10-15"));
        assert!(confirm.message.contains("10:00 AM"));
    }

    #[tokio::test]
    async fn reschedule_reports_cancel_and_confirm() {
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let mut client = mock_client(store).await;
        client.get_available_dates("12347").await.unwrap();

        let result = client
            .reschedule_appointment("12347", "2025-10-20", "09:00 AM", None)
            .await
            .unwrap();
        // Mock cancel succeeds; the skipped path is covered below with a
        // failing live cancel.
        assert_eq!(result.cancel_result.status, "success");
        assert!(result.message.contains("2025-10-20"));
        assert!(result.confirm_result.message.contains("09:00 AM"));
    }

    #[tokio::test]
    async fn reschedule_skips_failed_cancel() {
        // Live cancel against an unreachable endpoint, confirm still gated
        // to fixtures: the cancel leg fails, gets downgraded to "skipped",
        // and the confirm leg succeeds anyway.
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let session = store
            .create(
                "test-session",
                NewSession {
                    customer_id: "1645975".into(),
                    client_id: "09PF05VD".into(),
                    client_name: "testclient".into(),
                    auth_token: "tok".into(),
                },
            )
            .await
            .unwrap();
        let config = ClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            mode: ApiMode::Live,
            enable_real_confirm: false,
            enable_real_cancel: true,
            timeout: Duration::from_secs(2),
        };
        let client = SchedulerClient::new(Client::new(), config, session, store);

        let result = client
            .reschedule_appointment("12345", "2025-10-20", "09:00 AM", Some("REQ-12345-7"))
            .await
            .unwrap();
        assert_eq!(result.cancel_result.status, "skipped");
        assert!(result.cancel_result.reason.is_some());
        assert!(result.confirm_result.message.contains("2025-10-20"));
    }

    #[test]
    fn mock_and_live_confirm_shapes_match() {
        // A confirm envelope as the live schedule endpoint returns it.
        let live: Envelope<Confirmation> = serde_json::from_value(serde_json::json!({
            "status": "success",
            "message": "Appointment scheduled",
            "data": {
                "project_id": "12345",
                "scheduled_date": "2025-10-15",
                "scheduled_time": "10:00 AM",
                "request_id": "REQ-12345-7",
                "confirmation_number": "CONF-871",
            }
        }))
        .unwrap();
        let mocked = mock::confirm_appointment("12345", "2025-10-15", "10:00 AM", "REQ-12345-7");

        let keys = |e: &Envelope<Confirmation>| {
            let data = serde_json::to_value(&e.data).unwrap();
            data.as_object()
                .unwrap()
                .keys()
                .cloned()
                .collect::<Vec<_>>()
        };
        assert_eq!(keys(&live), keys(&mocked));
    }

    #[tokio::test]
    async fn supplemental_actions_return_data() {
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let client = mock_client(store).await;

        let hours = client.get_working_hours().await.unwrap();
        assert_eq!(hours.work_hours.len(), 7);
        assert!(hours.work_hours.iter().any(|d| !d.is_working));

        let note = client.add_note("12345", "Customer prefers mornings", None).await.unwrap();
        assert_eq!(note.note.author, "Agent");
        assert_eq!(note.note.project_id, "12345");
    }
}
