//! Typed per-action parameters.
//!
//! Inbound requests arrive as a flat string map (whatever the transport
//! envelope was, the gateway flattens it first). Each action converts that
//! map into its own struct, collecting every missing required name into one
//! `MissingParams` error so the caller can fix them all at once. Extra
//! parameters are ignored.

use std::collections::HashMap;

use slotline_core::SlotError;

/// Flat string parameter map extracted from the transport envelope.
#[derive(Debug, Clone, Default)]
pub struct ParamMap(HashMap<String, String>);

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        // Empty strings count as absent.
        self.0.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Pull the named required keys, or fail with all missing names at once.
    fn require(&self, keys: &[&str]) -> Result<Vec<String>, SlotError> {
        let missing: Vec<String> = keys
            .iter()
            .filter(|k| self.get(k).is_none())
            .map(|k| k.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SlotError::MissingParams(missing));
        }
        Ok(keys
            .iter()
            .filter_map(|k| self.get(k))
            .map(str::to_string)
            .collect())
    }
}

impl From<HashMap<String, String>> for ParamMap {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, String)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Per-action structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ListProjectsParams {
    pub customer_id: String,
}

impl ListProjectsParams {
    pub fn from_map(params: &ParamMap) -> Result<Self, SlotError> {
        let mut v = params.require(&["customer_id"])?;
        Ok(Self { customer_id: v.remove(0) })
    }
}

#[derive(Debug, Clone)]
pub struct GetAvailableDatesParams {
    pub project_id: String,
}

impl GetAvailableDatesParams {
    pub fn from_map(params: &ParamMap) -> Result<Self, SlotError> {
        let mut v = params.require(&["project_id"])?;
        Ok(Self { project_id: v.remove(0) })
    }
}

#[derive(Debug, Clone)]
pub struct GetTimeSlotsParams {
    pub project_id: String,
    pub date: String,
    pub request_id: Option<String>,
}

impl GetTimeSlotsParams {
    pub fn from_map(params: &ParamMap) -> Result<Self, SlotError> {
        let mut v = params.require(&["project_id", "date"])?;
        Ok(Self {
            project_id: v.remove(0),
            date: v.remove(0),
            request_id: params.get("request_id").map(str::to_string),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ConfirmAppointmentParams {
    pub project_id: String,
    pub date: String,
    pub time: String,
    pub request_id: Option<String>,
}

impl ConfirmAppointmentParams {
    pub fn from_map(params: &ParamMap) -> Result<Self, SlotError> {
        let mut v = params.require(&["project_id", "date", "time"])?;
        Ok(Self {
            project_id: v.remove(0),
            date: v.remove(0),
            time: v.remove(0),
            request_id: params.get("request_id").map(str::to_string),
        })
    }
}

#[derive(Debug, Clone)]
pub struct RescheduleAppointmentParams {
    pub project_id: String,
    pub new_date: String,
    pub new_time: String,
    pub request_id: Option<String>,
}

impl RescheduleAppointmentParams {
    pub fn from_map(params: &ParamMap) -> Result<Self, SlotError> {
        let mut v = params.require(&["project_id", "new_date", "new_time"])?;
        Ok(Self {
            project_id: v.remove(0),
            new_date: v.remove(0),
            new_time: v.remove(0),
            request_id: params.get("request_id").map(str::to_string),
        })
    }
}

#[derive(Debug, Clone)]
pub struct CancelAppointmentParams {
    pub project_id: String,
}

impl CancelAppointmentParams {
    pub fn from_map(params: &ParamMap) -> Result<Self, SlotError> {
        let mut v = params.require(&["project_id"])?;
        Ok(Self { project_id: v.remove(0) })
    }
}

#[derive(Debug, Clone)]
pub struct AddNoteParams {
    pub project_id: String,
    pub note_text: String,
    pub author: Option<String>,
}

impl AddNoteParams {
    pub fn from_map(params: &ParamMap) -> Result<Self, SlotError> {
        let mut v = params.require(&["project_id", "note_text"])?;
        Ok(Self {
            project_id: v.remove(0),
            note_text: v.remove(0),
            author: params.get("author").map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> ParamMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn missing_params_are_all_named() {
        let err = ConfirmAppointmentParams::from_map(&map(&[("project_id", "12345")])).unwrap_err();
        match err {
            SlotError::MissingParams(names) => {
                assert_eq!(names, vec!["date".to_string(), "time".to_string()]);
            }
            other => panic!("expected MissingParams, got {other:?}"),
        }
    }

    #[test]
    fn empty_values_count_as_missing() {
        let err = ListProjectsParams::from_map(&map(&[("customer_id", "")])).unwrap_err();
        assert!(matches!(err, SlotError::MissingParams(_)));
    }

    #[test]
    fn optional_request_id_passes_through() {
        let params = GetTimeSlotsParams::from_map(&map(&[
            ("project_id", "12345"),
            ("date", "2025-10-15"),
            ("request_id", "REQ-1"),
        ]))
        .unwrap();
        assert_eq!(params.request_id.as_deref(), Some("REQ-1"));

        let params = GetTimeSlotsParams::from_map(&map(&[
            ("project_id", "12345"),
            ("date", "2025-10-15"),
        ]))
        .unwrap();
        assert!(params.request_id.is_none());
    }

    #[test]
    fn extra_params_are_ignored() {
        let params = CancelAppointmentParams::from_map(&map(&[
            ("project_id", "12345"),
            ("color", "blue"),
        ]))
        .unwrap();
        assert_eq!(params.project_id, "12345");
    }
}
