//! HTTP API handlers and the transport parameter adapter.
//!
//! The action endpoint accepts two body shapes: a flat JSON object of
//! parameters, or the agent-platform envelope
//! `{"parameters": [{"name": …, "value": …}]}`. Both are flattened into a
//! `ParamMap` before anything else looks at them. Every error is mapped to
//! a structured `{error, action}` body; handlers never panic.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tracing::warn;

use slotline_core::SlotError;
use slotline_routing::{ActionRouter, ParamMap};

/// Shared application state for API handlers.
pub struct AppState {
    pub router: ActionRouter,
}

/// Build the Axum router with all API routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/actions", get(list_actions))
        .route("/api/actions/:action", post(invoke_action))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "slotline",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Catalog of supported actions and their required parameters.
async fn list_actions(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "actions": state.router.catalog() }))
}

/// Dispatch one scheduling action.
async fn invoke_action(
    Path(action): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> impl IntoResponse {
    let params = flatten_params(body.map(|Json(v)| v).unwrap_or(Value::Null));

    let session_id = match resolve_session_id(&headers, &params) {
        Some(id) => id,
        None => {
            let err = SlotError::Validation(
                "session_id is required (x-session-id header or body parameter)".to_string(),
            );
            return error_response(&action, &err);
        }
    };

    match state.router.dispatch(&action, &session_id, &params).await {
        Ok(outcome) => (StatusCode::OK, Json(serde_json::to_value(outcome).unwrap_or_default())),
        Err(err) => {
            warn!(action, error = %err, "Action failed");
            error_response(&action, &err)
        }
    }
}

/// Session identity: `x-session-id` header first, then a body parameter.
fn resolve_session_id(headers: &HeaderMap, params: &ParamMap) -> Option<String> {
    headers
        .get("x-session-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| params.get("session_id").map(str::to_string))
}

/// Flatten either supported body shape into a string parameter map.
/// Scalar values are stringified; nested objects/arrays are ignored.
pub fn flatten_params(body: Value) -> ParamMap {
    let mut params = ParamMap::new();

    let Value::Object(map) = body else {
        return params;
    };

    if let Some(Value::Array(pairs)) = map.get("parameters") {
        for pair in pairs {
            if let (Some(name), Some(value)) = (
                pair.get("name").and_then(Value::as_str),
                pair.get("value").map(scalar_to_string),
            ) {
                if let Some(value) = value {
                    params.insert(name, value);
                }
            }
        }
        return params;
    }

    for (key, value) in map {
        if let Some(value) = scalar_to_string(&value) {
            params.insert(key, value);
        }
    }
    params
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Map the error taxonomy to HTTP: caller mistakes are 400, scheduling-API
/// failures are 502 (retryable), everything else is 500.
fn error_response(action: &str, err: &SlotError) -> (StatusCode, Json<Value>) {
    let status = match err {
        SlotError::Validation(_) | SlotError::MissingParams(_) | SlotError::UnknownAction(_) => {
            StatusCode::BAD_REQUEST
        }
        SlotError::ApiRequest(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(json!({
            "error": err.to_string(),
            "action": action,
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_plain_object() {
        let params = flatten_params(json!({
            "project_id": "12345",
            "date": "2025-10-15",
            "count": 3,
        }));
        assert_eq!(params.get("project_id"), Some("12345"));
        assert_eq!(params.get("count"), Some("3"));
    }

    #[test]
    fn flattens_parameters_envelope() {
        let params = flatten_params(json!({
            "parameters": [
                {"name": "customer_id", "value": "1645975"},
                {"name": "client_id", "value": "09PF05VD"},
            ]
        }));
        assert_eq!(params.get("customer_id"), Some("1645975"));
        assert_eq!(params.get("client_id"), Some("09PF05VD"));
    }

    #[test]
    fn non_object_bodies_yield_empty_params() {
        assert!(flatten_params(Value::Null).get("anything").is_none());
        assert!(flatten_params(json!("text")).get("anything").is_none());
    }

    #[test]
    fn error_statuses_follow_taxonomy() {
        let (status, _) =
            error_response("get_time_slots", &SlotError::Validation("bad".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            error_response("x", &SlotError::MissingParams(vec!["date".into()]));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = error_response("x", &SlotError::UnknownAction("x".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = error_response("x", &SlotError::ApiRequest("timeout".into()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) = error_response("x", &SlotError::Storage("disk".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_body_names_action_and_message() {
        let (_, Json(body)) =
            error_response("confirm_appointment", &SlotError::Validation("nope".into()));
        assert_eq!(body["action"], "confirm_appointment");
        assert!(body["error"].as_str().unwrap().contains("nope"));
    }
}
