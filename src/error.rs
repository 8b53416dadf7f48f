//! Error type for OnDemand client operations.

use crate::traits::HttpError;

/// Error type for OnDemand client operations
#[derive(Debug)]
pub enum OnDemandError {
    /// HTTP request failed
    Http(HttpError),
    /// JSON deserialization failed
    Json(serde_json::Error),
    /// Server returned an error status
    ServerError { status: u16, message: String },
    /// Session was created but the response carried no identifier
    MissingSessionId { body: String },
    /// Response reported success but exposed no readable stream
    StreamUnavailable,
}

impl std::fmt::Display for OnDemandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OnDemandError::Http(e) => write!(f, "HTTP error: {}", e),
            OnDemandError::Json(e) => write!(f, "JSON error: {}", e),
            OnDemandError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            OnDemandError::MissingSessionId { body } => {
                write!(f, "'data.id' not found in session response: {}", body)
            }
            OnDemandError::StreamUnavailable => write!(f, "No readable stream in response"),
        }
    }
}

impl std::error::Error for OnDemandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OnDemandError::Http(e) => Some(e),
            OnDemandError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HttpError> for OnDemandError {
    fn from(e: HttpError) -> Self {
        OnDemandError::Http(e)
    }
}

impl From<serde_json::Error> for OnDemandError {
    fn from(e: serde_json::Error) -> Self {
        OnDemandError::Json(e)
    }
}
