// ABOUTME: Error types shared across the picker crates
// ABOUTME: Validation errors are inline and recoverable; fetch errors are logged and non-fatal

use thiserror::Error;

/// Errors surfaced on the picker itself, next to the input.
///
/// Neither kind is fatal: a validation error clears on the next qualifying
/// keystroke, and a fetch error is retried naturally by the next keystroke,
/// filter change, or clear.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickerError {
    /// Input shorter than the minimum searchable length.
    #[error("Minimum 3 characters")]
    MinimumLength,

    /// A backend call or payload parse failed.
    #[error("{0}")]
    Fetch(String),
}

impl PickerError {
    /// The inline message shown next to the input.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Failure reported by the metadata service collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The backend request itself failed (transport, auth, server error).
    #[error("metadata request failed: {0}")]
    Request(String),

    /// The backend answered with a payload that is not the expected
    /// JSON array of attribute maps.
    #[error("malformed metadata payload: {0}")]
    Payload(String),
}

impl From<ServiceError> for PickerError {
    fn from(err: ServiceError) -> Self {
        PickerError::Fetch(err.to_string())
    }
}
