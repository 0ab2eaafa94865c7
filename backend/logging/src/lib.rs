//! Structured logging for the Slotline service.
//!
//! JSON file output with daily rotation, console output for development,
//! and redaction of credentials before anything reaches a log line.

pub mod logger;
pub mod redact;

pub use logger::init_logger;
pub use redact::redact_sensitive_data;
