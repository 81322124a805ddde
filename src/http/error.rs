//! Request error taxonomy and its response mapping.
//!
//! # Design Decisions
//! - Every per-request error is absorbed at the request boundary: the
//!   caller always receives a well-formed response
//! - The error → (status, client payload, diagnostic fields) mapping is
//!   one total function, evaluated once at the boundary
//! - Clients only ever see the generic payload; diagnostic detail goes
//!   to the log

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;

use crate::http::context::RequestLog;

/// Errors a handler can surface. Only configuration failures are fatal
/// to the process; everything here maps to a response.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Recoverable downstream failure. Reported as 503; the retry
    /// counter records how many attempts were already made.
    #[error("dependency unavailable: {message}")]
    Transient { message: String, retry_count: u32 },

    /// Any other fault. Reported as 500 with full diagnostic detail in
    /// the log and none of it in the response.
    #[error("unexpected error: {message}")]
    Unexpected {
        kind: &'static str,
        message: String,
        trace: String,
    },
}

impl RequestError {
    pub fn status(&self) -> StatusCode {
        match self {
            RequestError::Transient { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RequestError::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The only text a caller ever sees for this error.
    pub fn client_message(&self) -> &'static str {
        match self {
            RequestError::Transient { .. } => "Service temporarily unavailable",
            RequestError::Unexpected { .. } => "Internal server error",
        }
    }

    pub fn log_message(&self) -> &'static str {
        match self {
            RequestError::Transient { .. } => "Dependency call failed",
            RequestError::Unexpected { .. } => "Unexpected error",
        }
    }

    /// Diagnostic fields for the ERROR entry logged at the boundary.
    pub fn log_fields(&self) -> Value {
        match self {
            RequestError::Transient {
                message,
                retry_count,
            } => json!({
                "error": message,
                "error_type": "TransientDependencyError",
                "retry_count": retry_count,
            }),
            RequestError::Unexpected {
                kind,
                message,
                trace,
            } => json!({
                "error": message,
                "error_type": kind,
                "trace": trace,
            }),
        }
    }

    /// Log the diagnostic side of this error, then produce the generic
    /// client response. The single boundary-crossing point for handler
    /// errors.
    pub fn into_logged_response(self, log: &RequestLog) -> Response {
        log.error(self.log_message(), self.log_fields());
        self.into_response()
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.client_message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_maps_to_503() {
        let err = RequestError::Transient {
            message: "Database connection timeout".into(),
            retry_count: 0,
        };
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.client_message(), "Service temporarily unavailable");
        assert_eq!(err.log_fields()["retry_count"], 0);
    }

    #[test]
    fn test_unexpected_maps_to_500_without_leaking_detail() {
        let err = RequestError::Unexpected {
            kind: "ParseError",
            message: "bad payload at offset 12".into(),
            trace: "handlers::create_order".into(),
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // The client payload never carries the diagnostic message.
        assert_eq!(err.client_message(), "Internal server error");
        assert_eq!(err.log_fields()["error_type"], "ParseError");
        assert_eq!(err.log_fields()["trace"], "handlers::create_order");
    }
}
