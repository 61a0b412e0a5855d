//! Engine error taxonomy

use thiserror::Error;

/// Errors produced by the analysis engine and its external collaborators
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Input that cannot produce a meaningful result (e.g. zero stop distance)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The external AI analyst could not be reached or answered with an error status
    #[error("external service unavailable: {0}")]
    ExternalServiceUnavailable(String),

    /// The external AI analyst answered, but the payload did not match the schema
    #[error("malformed external response: {0}")]
    MalformedExternalResponse(String),
}

impl EngineError {
    /// Shorthand for [`EngineError::InvalidInput`]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// True for failures of the external AI path, which callers always recover from
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            Self::ExternalServiceUnavailable(_) | Self::MalformedExternalResponse(_)
        )
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedExternalResponse(err.to_string())
    }
}
