use thiserror::Error;

/// Top-level error type for the Slotline scheduling service.
///
/// The three caller-facing classes map to distinct HTTP responses at the
/// gateway boundary: validation and unknown-action errors are the caller's
/// fault (400), scheduling-API failures are retryable (502), and everything
/// else is internal (500).
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("missing required parameters: {}", .0.join(", "))]
    MissingParams(Vec<String>),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("scheduling API request failed: {0}")]
    ApiRequest(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlotError {
    /// True for errors the caller can fix by changing their input.
    pub fn is_caller_fault(&self) -> bool {
        matches!(
            self,
            SlotError::Validation(_) | SlotError::MissingParams(_) | SlotError::UnknownAction(_)
        )
    }
}
