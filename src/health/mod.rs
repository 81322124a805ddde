//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Liveness (/health):
//!     Always 200 while the process is serving
//!
//! Readiness (/ready):
//!     → config::readiness re-queries critical keys from the LIVE source
//!     → 200 ready / 503 not ready, with config_loaded boolean
//!     → memory figure attached when the probe yields one
//!
//! Debug probe (/debug/memory):
//!     memory.rs snapshot → current/peak MB
//! ```
//!
//! # Design Decisions
//! - Readiness reflects the live source, not the startup snapshot, so
//!   external configuration drift is observable
//! - The memory probe is a read-only external interface; it informs the
//!   readiness body but never gates it

pub mod memory;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::config::validation::readiness;
use crate::http::server::AppState;

pub use memory::{FixedProbe, MemoryProbe, MemorySnapshot, ProcStatusProbe};

/// `GET /health`: basic liveness.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

/// `GET /ready`: readiness against the live configuration source.
pub async fn ready(State(state): State<AppState>) -> Response {
    let probe = readiness(state.source.as_ref());

    if probe.config_loaded() {
        let mut body = json!({ "status": "ready", "config_loaded": true });
        if let Some(snapshot) = state.memory.snapshot() {
            body["memory_mb"] = json!(snapshot.current_mb());
        }
        (StatusCode::OK, Json(body)).into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not ready",
                "config_loaded": false,
                "reason": "Configuration missing",
                "missing_keys": probe.missing,
            })),
        )
            .into_response()
    }
}

/// `GET /debug/memory`: expose the external probe snapshot.
pub async fn debug_memory(State(state): State<AppState>) -> Response {
    match state.memory.snapshot() {
        Some(snapshot) => Json(json!({
            "current_mb": snapshot.current_mb(),
            "peak_mb": snapshot.peak_mb(),
        }))
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Memory probe unavailable" })),
        )
            .into_response(),
    }
}
