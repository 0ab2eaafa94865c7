//! Deterministic mock fixtures for the scheduling API.
//!
//! Shapes mirror the live API envelopes exactly; values are canned. No
//! network and no persistence. Mock confirm/cancel acknowledge without
//! recording anything.

use chrono::{Datelike, Duration, Local, Utc};
use uuid::Uuid;

use slotline_core::{Cancellation, Confirmation, Note, WorkingDay};

use crate::types::{DatesPayload, Envelope, RawProject, SlotsPayload, WorkHoursPayload};

fn unix_ts() -> i64 {
    Utc::now().timestamp()
}

/// Projects fixture. Every customer sees the same three projects, the first
/// of which (`12345`) already has an appointment on the books.
pub fn projects(_customer_id: &str) -> Envelope<Vec<RawProject>> {
    Envelope {
        status: "success".to_string(),
        message: None,
        data: vec![
            RawProject {
                project_project_id: Some("12345".into()),
                project_project_number: Some("ORD-2025-001".into()),
                project_type_project_type: Some("Installation".into()),
                project_category_category: Some("Flooring".into()),
                status_info_status: Some("Scheduled".into()),
                project_store_store_number: Some("ST-101".into()),
                installation_address_full_address: Some("123 Main St, Tampa, FL 33601".into()),
                project_date_scheduled_date: Some("2025-10-15".into()),
            },
            RawProject {
                project_project_id: Some("12347".into()),
                project_project_number: Some("ORD-2025-002".into()),
                project_type_project_type: Some("Installation".into()),
                project_category_category: Some("Windows".into()),
                status_info_status: Some("Pending".into()),
                project_store_store_number: Some("ST-102".into()),
                installation_address_full_address: Some("456 Oak Ave, Tampa, FL 33602".into()),
                project_date_scheduled_date: None,
            },
            RawProject {
                project_project_id: Some("12350".into()),
                project_project_number: Some("ORD-2025-003".into()),
                project_type_project_type: Some("Repair".into()),
                project_category_category: Some("Deck Repair".into()),
                status_info_status: Some("Pending".into()),
                project_store_store_number: Some("ST-103".into()),
                installation_address_full_address: Some("789 Pine Dr, Clearwater, FL 33755".into()),
                project_date_scheduled_date: None,
            },
        ],
    }
}

/// Available dates: the next 14 calendar days, weekdays only.
pub fn available_dates(project_id: &str) -> Envelope<DatesPayload> {
    let today = Local::now().date_naive();
    let dates = (1..=14)
        .map(|i| today + Duration::days(i))
        .filter(|d| d.weekday().number_from_monday() <= 5)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();

    Envelope {
        status: "success".to_string(),
        message: None,
        data: DatesPayload {
            dates,
            request_id: format!("REQ-{}-{}", project_id, unix_ts()),
        },
    }
}

/// Time slots: fixed working-day grid, lunch hour omitted.
pub fn time_slots(_project_id: &str, _date: &str) -> Envelope<SlotsPayload> {
    Envelope {
        status: "success".to_string(),
        message: None,
        data: SlotsPayload {
            slots: [
                "08:00 AM", "09:00 AM", "10:00 AM", "11:00 AM", "01:00 PM", "02:00 PM",
                "03:00 PM", "04:00 PM", "05:00 PM",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        },
    }
}

pub fn confirm_appointment(
    project_id: &str,
    date: &str,
    time: &str,
    request_id: &str,
) -> Envelope<Confirmation> {
    Envelope {
        status: "success".to_string(),
        message: Some(format!(
            "[MOCK] Appointment scheduled successfully for project {project_id} on {date} at {time}"
        )),
        data: Confirmation {
            project_id: project_id.to_string(),
            scheduled_date: date.to_string(),
            scheduled_time: time.to_string(),
            request_id: request_id.to_string(),
            confirmation_number: format!("CONF-{}", unix_ts()),
        },
    }
}

pub fn cancel_appointment(project_id: &str) -> Envelope<Cancellation> {
    Envelope {
        status: "success".to_string(),
        message: Some(format!(
            "[MOCK] Appointment cancelled successfully for project {project_id}"
        )),
        data: Cancellation {
            project_id: project_id.to_string(),
            cancelled_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            cancellation_id: format!("CANC-{}", unix_ts()),
        },
    }
}

/// Weekly business hours: Mon–Fri 08:00–17:00.
pub fn working_hours(_client_id: &str) -> Envelope<WorkHoursPayload> {
    let workday = |day: &str| WorkingDay {
        day: day.to_string(),
        is_working: true,
        start: Some("08:00".into()),
        end: Some("17:00".into()),
    };
    let weekend = |day: &str| WorkingDay {
        day: day.to_string(),
        is_working: false,
        start: None,
        end: None,
    };
    Envelope {
        status: "success".to_string(),
        message: None,
        data: WorkHoursPayload {
            work_hours: vec![
                workday("Monday"),
                workday("Tuesday"),
                workday("Wednesday"),
                workday("Thursday"),
                workday("Friday"),
                weekend("Saturday"),
                weekend("Sunday"),
            ],
        },
    }
}

pub fn add_note(project_id: &str, note_text: &str, author: &str) -> Envelope<Note> {
    Envelope {
        status: "success".to_string(),
        message: Some(format!("[MOCK] Note added successfully to project {project_id}")),
        data: Note {
            note_id: Uuid::new_v4().to_string(),
            project_id: project_id.to_string(),
            note_text: note_text.to_string(),
            author: author.to_string(),
            created_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projects_include_known_fixture() {
        let envelope = projects("1645975");
        let ids: Vec<_> = envelope
            .data
            .iter()
            .filter_map(|p| p.project_project_id.clone())
            .collect();
        assert!(ids.contains(&"12345".to_string()));
        assert_eq!(envelope.data.len(), 3);
    }

    #[test]
    fn dates_are_weekdays_only() {
        let envelope = available_dates("12345");
        assert!(!envelope.data.dates.is_empty());
        for d in &envelope.data.dates {
            let parsed = chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap();
            assert!(parsed.weekday().number_from_monday() <= 5, "weekend date {d}");
        }
        assert!(envelope.data.request_id.starts_with("REQ-12345-"));
    }

    #[test]
    fn slots_include_mid_morning() {
        let envelope = time_slots("12345", "2025-10-15");
        assert!(envelope.data.slots.contains(&"10:00 AM".to_string()));
    }

    #[test]
    fn confirm_message_names_date_and_time() {
        let envelope = confirm_appointment("12345", "2025-10-15", "10:00 AM", "REQ-1");
        let message = envelope.message.unwrap();
        assert!(message.contains("2025-10-15"));
        assert!(message.contains("10:00 AM"));
        assert!(envelope.data.confirmation_number.starts_with("CONF-"));
    }
}
