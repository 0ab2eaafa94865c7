//! Input validators for action parameters.
//!
//! All validators reject before any network or storage call is made, naming
//! the offending field in the error message. Dates are strict `YYYY-MM-DD`;
//! times are human-readable labels (`"10:00 AM"` or 24-hour `"14:30"`) and
//! are validated by shape only, with no timezone handling here.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SlotError;

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());
static TIME_12H_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2]):[0-5][0-9] (AM|PM)$").unwrap());
static TIME_24H_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap());

const MAX_SESSION_ID_LEN: usize = 128;

fn require_id(value: &str, field: &str) -> Result<String, SlotError> {
    if value.is_empty() {
        return Err(SlotError::Validation(format!("{field} must not be empty")));
    }
    if !ID_PATTERN.is_match(value) {
        return Err(SlotError::Validation(format!(
            "{field} contains invalid characters: {value}"
        )));
    }
    Ok(value.to_string())
}

/// Customer identifier: non-empty, alphanumeric plus `-` and `_`.
pub fn customer_id(value: &str) -> Result<String, SlotError> {
    require_id(value, "customer_id")
}

/// Project identifier: same character set as customer ids.
pub fn project_id(value: &str) -> Result<String, SlotError> {
    require_id(value, "project_id")
}

/// Session identifier: opaque but bounded, so it can key storage safely.
pub fn session_id(value: &str) -> Result<String, SlotError> {
    if value.is_empty() {
        return Err(SlotError::Validation("session_id must not be empty".into()));
    }
    if value.len() > MAX_SESSION_ID_LEN {
        return Err(SlotError::Validation(format!(
            "session_id exceeds {MAX_SESSION_ID_LEN} characters"
        )));
    }
    Ok(value.to_string())
}

/// Strict `YYYY-MM-DD` calendar date. Rejects impossible dates
/// (2025-02-30) as well as other orderings (10-20-2025).
pub fn date(value: &str) -> Result<String, SlotError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| value.to_string())
        .map_err(|_| {
            SlotError::Validation(format!("date must be YYYY-MM-DD, got: {value}"))
        })
}

/// Appointment time label: 12-hour `"10:00 AM"` or 24-hour `"14:30"`.
pub fn time(value: &str) -> Result<String, SlotError> {
    if TIME_12H_PATTERN.is_match(value) || TIME_24H_PATTERN.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(SlotError::Validation(format!(
            "time must look like \"10:00 AM\" or \"14:30\", got: {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_ids() {
        assert_eq!(customer_id("CUST001").unwrap(), "CUST001");
        assert_eq!(customer_id("CUST-123-ABC").unwrap(), "CUST-123-ABC");
        assert_eq!(project_id("12345").unwrap(), "12345");
        assert_eq!(project_id("PRJ-001").unwrap(), "PRJ-001");
    }

    #[test]
    fn rejects_bad_ids() {
        assert!(customer_id("").is_err());
        assert!(customer_id("cust@123").is_err());
        assert!(project_id("").is_err());
    }

    #[test]
    fn accepts_valid_dates() {
        assert_eq!(date("2025-10-20").unwrap(), "2025-10-20");
        assert_eq!(date("2025-01-01").unwrap(), "2025-01-01");
    }

    #[test]
    fn rejects_bad_dates() {
        assert!(date("10-20-2025").is_err());
        assert!(date("2025-13-01").is_err());
        assert!(date("2025-02-30").is_err());
        assert!(date("not-a-date").is_err());
    }

    #[test]
    fn accepts_valid_times() {
        assert_eq!(time("10:00 AM").unwrap(), "10:00 AM");
        assert_eq!(time("09:00").unwrap(), "09:00");
        assert_eq!(time("23:59").unwrap(), "23:59");
    }

    #[test]
    fn rejects_bad_times() {
        assert!(time("9:00").is_err());
        assert!(time("25:00").is_err());
        assert!(time("10:00am").is_err());
        assert!(time("13:00 PM").is_err());
    }

    #[test]
    fn session_id_bounds() {
        assert!(session_id("agent-session-abc123").is_ok());
        assert!(session_id("").is_err());
        assert!(session_id(&"x".repeat(200)).is_err());
    }
}
