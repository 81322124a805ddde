//! Correlation middleware: request ids and lifecycle logging.
//!
//! # Responsibilities
//! - Reuse the inbound correlation id or generate one, as early as
//!   possible
//! - Emit one start entry and exactly one completion entry per request
//! - Grade the completion entry from the final status code
//!
//! # Design Decisions
//! - The completion guard fires from `Drop`, so a request cancelled
//!   mid-flight still produces a completion entry, marked `aborted`
//! - Panics never reach this layer: the catch-panic layer nested inside
//!   converts them to 500 responses, which complete like any other error
//! - The correlation id is echoed back to the caller in the response

use std::net::SocketAddr;
use std::time::Instant;

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{header, HeaderName, HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use serde_json::json;
use uuid::Uuid;

use crate::http::context::{RequestContext, RequestLog, X_REQUEST_ID};
use crate::http::server::AppState;
use crate::observability::logging::LogEmitter;
use crate::observability::metrics;
use crate::observability::severity::severity_for_status;

/// Status marker for requests that never produced a response.
pub const ABORTED_STATUS: &str = "aborted";

/// Wraps every route: request id, start entry, delegation, completion.
pub async fn correlation_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let ctx = RequestContext {
        request_id: request_id.clone(),
        started_at: Instant::now(),
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        remote_addr,
        user_agent,
    };

    state.emitter.info(
        "Request started",
        &ctx.request_id,
        json!({
            "method": ctx.method,
            "path": ctx.path,
            "remote_addr": ctx.remote_addr,
            "user_agent": ctx.user_agent,
        }),
    );

    request
        .extensions_mut()
        .insert(RequestLog::new(state.emitter.clone(), &ctx.request_id));

    let guard = CompletionGuard::new(state.emitter.clone(), ctx);
    let mut response = next.run(request).await;
    guard.finish(response.status());

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(X_REQUEST_ID), value);
    }
    response
}

/// Emits the completion entry exactly once: from [`finish`] on the
/// normal path, or from `Drop` when the request future is cancelled
/// before a response exists.
///
/// [`finish`]: CompletionGuard::finish
struct CompletionGuard {
    emitter: LogEmitter,
    ctx: Option<RequestContext>,
}

impl CompletionGuard {
    fn new(emitter: LogEmitter, ctx: RequestContext) -> Self {
        Self {
            emitter,
            ctx: Some(ctx),
        }
    }

    fn finish(mut self, status: StatusCode) {
        self.fire(Some(status.as_u16()));
    }

    fn fire(&mut self, status: Option<u16>) {
        let Some(ctx) = self.ctx.take() else {
            return;
        };
        let duration = ctx.started_at.elapsed();
        let duration_ms = (ctx.elapsed_ms() * 100.0).round() / 100.0;
        let level = severity_for_status(status);
        let status_field = match status {
            Some(code) => json!(code),
            None => json!(ABORTED_STATUS),
        };

        self.emitter.emit(
            level,
            "Request completed",
            &ctx.request_id,
            json!({
                "status_code": status_field,
                "duration_ms": duration_ms,
            }),
        );
        metrics::record_request(&ctx.method, status, duration);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.fire(None);
    }
}
