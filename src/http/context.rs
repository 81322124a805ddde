//! Per-request correlation context.
//!
//! # Design Decisions
//! - Context is owned by one request's middleware frame and handed to
//!   handlers through request extensions; there is no process-wide
//!   "current request" slot
//! - The correlation id is opaque: inbound ids are reused verbatim with
//!   no format validation

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use crate::observability::logging::{Level, LogEmitter};

/// Correlation header consumed from and echoed back to callers.
pub const X_REQUEST_ID: &str = "x-request-id";

/// State owned by one request's execution, created when the request
/// enters the correlation middleware and discarded at completion.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub started_at: Instant,
    pub method: String,
    pub path: String,
    pub remote_addr: String,
    pub user_agent: String,
}

impl RequestContext {
    /// Milliseconds elapsed since the request entered the middleware.
    pub fn elapsed_ms(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64() * 1000.0
    }
}

/// Handler-facing logging handle: the shared emitter bound to this
/// request's correlation id.
///
/// Placed in request extensions by the correlation middleware; cloning is
/// cheap and every clone carries the same id.
#[derive(Clone)]
pub struct RequestLog {
    emitter: LogEmitter,
    request_id: Arc<str>,
}

impl RequestLog {
    pub fn new(emitter: LogEmitter, request_id: &str) -> Self {
        Self {
            emitter,
            request_id: Arc::from(request_id),
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn emit(&self, level: Level, message: &str, extra: Value) {
        self.emitter.emit(level, message, &self.request_id, extra);
    }

    pub fn info(&self, message: &str, extra: Value) {
        self.emit(Level::Info, message, extra);
    }

    pub fn warn(&self, message: &str, extra: Value) {
        self.emit(Level::Warn, message, extra);
    }

    pub fn error(&self, message: &str, extra: Value) {
        self.emit(Level::Error, message, extra);
    }
}
