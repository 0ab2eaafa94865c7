//! Action names and their parameter catalog.

use serde::Serialize;

use slotline_core::SlotError;

/// The scheduling operations this service dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ListProjects,
    GetAvailableDates,
    GetTimeSlots,
    ConfirmAppointment,
    RescheduleAppointment,
    CancelAppointment,
    GetWorkingHours,
    AddNote,
}

pub const ALL_ACTIONS: &[Action] = &[
    Action::ListProjects,
    Action::GetAvailableDates,
    Action::GetTimeSlots,
    Action::ConfirmAppointment,
    Action::RescheduleAppointment,
    Action::CancelAppointment,
    Action::GetWorkingHours,
    Action::AddNote,
];

impl Action {
    /// Parse an action name. Leading slashes are stripped and hyphens and
    /// underscores are interchangeable (`/get-time-slots` == `get_time_slots`).
    pub fn parse(raw: &str) -> Result<Self, SlotError> {
        let normalized = raw.trim_start_matches('/').replace('-', "_");
        match normalized.as_str() {
            "list_projects" => Ok(Action::ListProjects),
            "get_available_dates" => Ok(Action::GetAvailableDates),
            "get_time_slots" => Ok(Action::GetTimeSlots),
            "confirm_appointment" => Ok(Action::ConfirmAppointment),
            "reschedule_appointment" => Ok(Action::RescheduleAppointment),
            "cancel_appointment" => Ok(Action::CancelAppointment),
            "get_working_hours" => Ok(Action::GetWorkingHours),
            "add_note" => Ok(Action::AddNote),
            _ => Err(SlotError::UnknownAction(raw.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::ListProjects => "list_projects",
            Action::GetAvailableDates => "get_available_dates",
            Action::GetTimeSlots => "get_time_slots",
            Action::ConfirmAppointment => "confirm_appointment",
            Action::RescheduleAppointment => "reschedule_appointment",
            Action::CancelAppointment => "cancel_appointment",
            Action::GetWorkingHours => "get_working_hours",
            Action::AddNote => "add_note",
        }
    }

    /// Required parameters, for the catalog endpoint and error messages.
    /// `session_id` and identity fields are transport-level and not listed.
    pub fn required_params(&self) -> &'static [&'static str] {
        match self {
            Action::ListProjects => &["customer_id"],
            Action::GetAvailableDates => &["project_id"],
            Action::GetTimeSlots => &["project_id", "date"],
            Action::ConfirmAppointment => &["project_id", "date", "time"],
            Action::RescheduleAppointment => &["project_id", "new_date", "new_time"],
            Action::CancelAppointment => &["project_id"],
            Action::GetWorkingHours => &[],
            Action::AddNote => &["project_id", "note_text"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hyphen_and_underscore_spellings() {
        assert_eq!(Action::parse("get-time-slots").unwrap(), Action::GetTimeSlots);
        assert_eq!(Action::parse("get_time_slots").unwrap(), Action::GetTimeSlots);
        assert_eq!(Action::parse("/confirm-appointment").unwrap(), Action::ConfirmAppointment);
    }

    #[test]
    fn unknown_action_is_distinct_error() {
        let err = Action::parse("make-coffee").unwrap_err();
        assert!(matches!(err, SlotError::UnknownAction(_)));
        assert!(err.to_string().contains("make-coffee"));
    }

    #[test]
    fn catalog_covers_all_actions() {
        assert_eq!(ALL_ACTIONS.len(), 8);
        for action in ALL_ACTIONS {
            assert_eq!(Action::parse(action.name()).unwrap(), *action);
        }
    }
}
