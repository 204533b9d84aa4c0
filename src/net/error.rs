//! Error taxonomy for API calls.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, HTTP error statuses and undecodable bodies are kept
//! apart here so pages can show a useful message. The session store collapses
//! all of them into "not authenticated".

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

use crate::nav::routes::RouteId;

/// Errors produced by [`crate::net::api::ApiClient`] calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Decode(String),

    /// HTTP is only wired up in the browser build.
    #[error("not available outside the browser")]
    Unavailable,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
}

impl ApiError {
    /// Build a status error, preferring the `error` field of a JSON body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let from_json = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .map(|b| b.error)
            .filter(|e| !e.is_empty());
        let message = from_json.unwrap_or_else(|| {
            let text = body.trim();
            if text.is_empty() { "request failed".to_owned() } else { text.to_owned() }
        });
        Self::Status { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Error view to show for auth failures: 401 and 403 map to their routes.
    pub fn redirect_route(&self) -> Option<RouteId> {
        match self.status() {
            Some(401) => Some(RouteId::Unauthorized),
            Some(403) => Some(RouteId::Forbidden),
            _ => None,
        }
    }
}
