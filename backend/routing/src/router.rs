//! Action router: validate, bind a session, delegate to the API client.
//!
//! One `ActionRouter` is constructed at startup and shared; each dispatch
//! resolves (or creates) the session and builds a fresh session-bound
//! `SchedulerClient`, so request_id chaining flows through the session
//! store rather than client instance state.

use std::sync::Arc;

use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use slotline_client::{ClientConfig, SchedulerClient};
use slotline_core::{validate, SlotError};
use slotline_session::{NewSession, Session, SessionStore};

use crate::action::{Action, ALL_ACTIONS};
use crate::params::{
    AddNoteParams, CancelAppointmentParams, ConfirmAppointmentParams, GetAvailableDatesParams,
    GetTimeSlotsParams, ListProjectsParams, ParamMap, RescheduleAppointmentParams,
};

// Identity defaults applied when a brand-new session arrives without
// identity parameters. Useful for local testing and mock mode.
const DEFAULT_CUSTOMER_ID: &str = "CUST001";
const DEFAULT_CLIENT_ID: &str = "CLIENT001";
const DEFAULT_CLIENT_NAME: &str = "testclient";

/// Normalized result of one dispatched action.
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    pub action: &'static str,
    pub mock_mode: bool,
    #[serde(flatten)]
    pub payload: Value,
}

/// One row of the action catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub action: &'static str,
    pub required_params: &'static [&'static str],
}

pub struct ActionRouter {
    store: Arc<dyn SessionStore>,
    client_config: ClientConfig,
    http: Client,
}

impl ActionRouter {
    pub fn new(store: Arc<dyn SessionStore>, client_config: ClientConfig) -> Self {
        Self {
            store,
            client_config,
            http: Client::new(),
        }
    }

    /// The supported actions and their required parameters.
    pub fn catalog(&self) -> Vec<CatalogEntry> {
        ALL_ACTIONS
            .iter()
            .map(|a| CatalogEntry {
                action: a.name(),
                required_params: a.required_params(),
            })
            .collect()
    }

    async fn get_or_create_session(
        &self,
        session_id: &str,
        params: &ParamMap,
    ) -> Result<Session, SlotError> {
        if let Some(session) = self
            .store
            .get(session_id)
            .await
            .map_err(|e| SlotError::Storage(e.to_string()))?
        {
            return Ok(session);
        }

        info!(session_id, "Creating new session");
        let fields = NewSession {
            customer_id: params.get("customer_id").unwrap_or(DEFAULT_CUSTOMER_ID).to_string(),
            client_id: params.get("client_id").unwrap_or(DEFAULT_CLIENT_ID).to_string(),
            client_name: params.get("client_name").unwrap_or(DEFAULT_CLIENT_NAME).to_string(),
            auth_token: params.get("authorization").unwrap_or_default().to_string(),
        };
        self.store
            .create(session_id, fields)
            .await
            .map_err(|e| SlotError::Storage(e.to_string()))
    }

    /// Dispatch one action for one session.
    pub async fn dispatch(
        &self,
        action_name: &str,
        session_id: &str,
        params: &ParamMap,
    ) -> Result<ActionOutcome, SlotError> {
        let action = Action::parse(action_name)?;
        let session_id = validate::session_id(session_id)?;
        let session = self.get_or_create_session(&session_id, params).await?;

        info!(action = action.name(), session_id, "Processing action");
        let mut client = SchedulerClient::new(
            self.http.clone(),
            self.client_config.clone(),
            session,
            Arc::clone(&self.store),
        );

        let (mock_mode, payload) = match action {
            Action::ListProjects => {
                let p = ListProjectsParams::from_map(params)?;
                let projects = client.list_projects(&p.customer_id).await?;
                (
                    client.is_mock(),
                    json!({
                        "customer_id": p.customer_id,
                        "project_count": projects.len(),
                        "projects": projects,
                    }),
                )
            }
            Action::GetAvailableDates => {
                let p = GetAvailableDatesParams::from_map(params)?;
                let dates = client.get_available_dates(&p.project_id).await?;
                (
                    client.is_mock(),
                    json!({
                        "project_id": p.project_id,
                        "available_dates": dates.dates,
                        "request_id": dates.request_id,
                    }),
                )
            }
            Action::GetTimeSlots => {
                let p = GetTimeSlotsParams::from_map(params)?;
                let slots = client
                    .get_time_slots(&p.project_id, &p.date, p.request_id.as_deref())
                    .await?;
                (
                    client.is_mock(),
                    json!({
                        "project_id": p.project_id,
                        "date": p.date,
                        "available_slots": slots.slots,
                    }),
                )
            }
            Action::ConfirmAppointment => {
                let p = ConfirmAppointmentParams::from_map(params)?;
                let result = client
                    .confirm_appointment(&p.project_id, &p.date, &p.time, p.request_id.as_deref())
                    .await?;
                (
                    client.confirm_uses_mock(),
                    json!({
                        "project_id": p.project_id,
                        "scheduled_date": p.date,
                        "scheduled_time": p.time,
                        "message": result.message,
                        "confirmation_data": result.confirmation_data,
                    }),
                )
            }
            Action::RescheduleAppointment => {
                let p = RescheduleAppointmentParams::from_map(params)?;
                let result = client
                    .reschedule_appointment(
                        &p.project_id,
                        &p.new_date,
                        &p.new_time,
                        p.request_id.as_deref(),
                    )
                    .await?;
                // Both legs are gated independently; the outcome is mock
                // data whenever either leg used fixtures.
                (
                    client.confirm_uses_mock() || client.cancel_uses_mock(),
                    json!({
                        "project_id": p.project_id,
                        "new_date": p.new_date,
                        "new_time": p.new_time,
                        "cancel_result": result.cancel_result,
                        "confirm_result": result.confirm_result,
                        "message": result.message,
                    }),
                )
            }
            Action::CancelAppointment => {
                let p = CancelAppointmentParams::from_map(params)?;
                let result = client.cancel_appointment(&p.project_id).await?;
                (
                    client.cancel_uses_mock(),
                    json!({
                        "project_id": p.project_id,
                        "message": result.message,
                        "cancellation_data": result.cancellation_data,
                    }),
                )
            }
            Action::GetWorkingHours => {
                let hours = client.get_working_hours().await?;
                (
                    client.is_mock(),
                    json!({
                        "client_id": client.session().client_id,
                        "work_hours": hours.work_hours,
                    }),
                )
            }
            Action::AddNote => {
                let p = AddNoteParams::from_map(params)?;
                let result = client
                    .add_note(&p.project_id, &p.note_text, p.author.as_deref())
                    .await?;
                (
                    client.is_mock(),
                    json!({
                        "project_id": p.project_id,
                        "message": result.message,
                        "note": result.note,
                    }),
                )
            }
        };

        Ok(ActionOutcome {
            action: action.name(),
            mock_mode,
            payload,
        })
    }
}
