//! Log redaction.
//!
//! Scrubs credentials from strings prior to logging: the scheduling API's
//! bearer-style `authorization` values and any `auth_token` fields that end
//! up serialized into diagnostics.

use once_cell::sync::Lazy;
use regex::Regex;

static BEARER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").unwrap());
static AUTH_FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)("?(?:auth_token|authorization)"?\s*[:=]\s*)"?[^",\s}]+"?"#).unwrap()
});

/// Redacts credential patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = BEARER_RE.replace_all(input, "[REDACTED_TOKEN]");
    AUTH_FIELD_RE
        .replace_all(&redacted, "${1}\"[REDACTED_TOKEN]\"")
        .to_string()
}
