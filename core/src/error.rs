//! Error types for the museum API client.
//!
//! # Design
//! `ApiError` classifies what went wrong: the server answered with a non-2xx
//! status, the request went out but nothing came back, or the request never
//! left (or its reply was unusable). Calling code never sees that
//! classification. `ApiError::normalize` collapses every case into a single
//! `NormalizedError { ok: false, data: null, message }` and logs the failure
//! with a severity that depends on the status.

use serde::Serialize;

/// Message surfaced when a request was sent but no response arrived.
pub const NO_RESPONSE_MESSAGE: &str = "No response from server. Check your connection.";

/// Message surfaced when a request fails before sending and carries no
/// description of its own.
pub const REQUEST_FAILED_MESSAGE: &str = "Error performing the request";

/// Failure classification produced by `MuseumClient` and the `Adapter`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a status outside 2xx.
    #[error("HTTP {status} {status_text}")]
    Status {
        status: u16,
        status_text: String,
        /// The `mensaje` field of the error body, when present and non-empty.
        message: Option<String>,
    },

    /// The request was sent but no response arrived (refused connection,
    /// timeout, truncated body).
    #[error("no response from server: {0}")]
    NoResponse(String),

    /// The request could not be constructed or sent.
    #[error("{0}")]
    Request(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A 2xx response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// A 2xx response carried no payload where a record was expected.
    #[error("response carried no data")]
    MissingPayload,
}

/// The single error shape handed to calling code.
///
/// Serializes as `{ "ok": false, "data": null, "message": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct NormalizedError {
    pub ok: bool,
    pub data: Option<serde_json::Value>,
    pub message: String,
}

impl NormalizedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            message: message.into(),
        }
    }
}

impl ApiError {
    /// Surfaced message for this failure, without logging.
    pub fn message(&self) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Status {
                status,
                status_text,
                ..
            } => match status_text.trim() {
                "" => format!("Error: {status}"),
                reason => format!("Error: {status} {reason}"),
            },
            ApiError::NoResponse(_) => NO_RESPONSE_MESSAGE.to_string(),
            ApiError::Request(reason) if reason.trim().is_empty() => {
                REQUEST_FAILED_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }

    /// Log the failure against `url` and collapse it into a `NormalizedError`.
    pub fn normalize(self, url: &str) -> NormalizedError {
        match &self {
            ApiError::Status { status: 404, .. } => {
                tracing::warn!(url, "resource not found");
            }
            ApiError::Status { status: 400, .. } => {
                tracing::warn!(url, "invalid request");
            }
            ApiError::Status { status, .. } if *status >= 500 => {
                tracing::error!(url, status, "server error");
            }
            ApiError::Status { status, .. } => {
                tracing::warn!(url, status, "request rejected");
            }
            ApiError::NoResponse(reason) => {
                tracing::error!(url, %reason, "no response from server");
            }
            other => {
                tracing::error!(url, error = %other, "request failed");
            }
        }
        NormalizedError::new(self.message())
    }
}

/// Extract a non-empty `mensaje` string from an error body, if it is JSON.
pub(crate) fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("mensaje")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
