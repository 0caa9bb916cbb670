//! Field-level validation errors for request payloads.

use serde::Serialize;

/// A request field that was missing or could not be parsed.
///
/// `field` names the offending field as it appears on the wire (e.g. `amount`)
/// and `reason` is a short human readable explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    /// The name of the field that failed validation.
    pub field: &'static str,
    /// Why the field was rejected.
    pub reason: String,
}

impl ValidationError {
    /// Create a validation error for `field`.
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    /// A validation error for a required field that was not provided.
    pub fn missing(field: &'static str) -> Self {
        Self::new(field, "is required")
    }
}
