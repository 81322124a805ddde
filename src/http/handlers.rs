//! Demonstration API handlers.
//!
//! The business collaborators the reliability core wraps. Each one
//! exercises a piece of the core: correlation logging, redact-then-log,
//! the error taxonomy, configuration consumption.

use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::http::context::RequestLog;
use crate::http::error::RequestError;
use crate::http::server::AppState;
use crate::observability::redact::redact_default;

#[derive(Debug, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// `GET /api/users/{user_id}`: user lookup over a simulated flaky
/// datastore.
pub async fn get_user(
    State(state): State<AppState>,
    Extension(log): Extension<RequestLog>,
    Path(user_id): Path<String>,
) -> Response {
    log.info("Fetching user", json!({ "user_id": user_id }));

    match fetch_user(&state, &user_id).await {
        Ok(user) => {
            log.info(
                "User fetched successfully",
                json!({ "user_id": user_id, "found": true }),
            );
            Json(user).into_response()
        }
        Err(err) => err.into_logged_response(&log),
    }
}

async fn fetch_user(state: &AppState, user_id: &str) -> Result<User, RequestError> {
    // Simulated datastore call with a configurable failure rate.
    if rand::thread_rng().gen::<f64>() < state.failure_rate {
        return Err(RequestError::Transient {
            message: "Database connection timeout".to_string(),
            retry_count: 0,
        });
    }

    // The demo datastore keys users numerically; anything else takes the
    // unexpected-fault path.
    let numeric_id: u64 = user_id.parse().map_err(|e: std::num::ParseIntError| {
        RequestError::Unexpected {
            kind: "ParseIntError",
            message: e.to_string(),
            trace: "handlers::fetch_user: parsing datastore key".to_string(),
        }
    })?;

    Ok(User {
        id: numeric_id.to_string(),
        name: "John Doe".to_string(),
        email: "john@example.com".to_string(),
    })
}

/// `POST /api/orders`: order creation. The caller-supplied payload is
/// redacted before any of it reaches the log.
pub async fn create_order(
    Extension(log): Extension<RequestLog>,
    Json(payload): Json<Map<String, Value>>,
) -> Response {
    let item_count = payload
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);

    let safe_payload = redact_default(&payload);
    log.info(
        "Creating order",
        json!({ "order_data": safe_payload, "item_count": item_count }),
    );

    let order_id = Uuid::new_v4().to_string();
    log.info(
        "Order created successfully",
        json!({
            "order_id": order_id,
            "total_amount": payload.get("total").cloned().unwrap_or_else(|| json!(0)),
        }),
    );

    (StatusCode::CREATED, Json(json!({ "order_id": order_id }))).into_response()
}

/// `GET /api/slow`: simulated slow operation for latency tracking.
pub async fn slow(Extension(log): Extension<RequestLog>) -> Json<Value> {
    log.info("Processing slow request", json!({}));

    tokio::time::sleep(Duration::from_millis(2000)).await;

    log.warn(
        "Slow operation completed",
        json!({ "duration_ms": 2000, "operation": "data_processing" }),
    );

    Json(json!({ "status": "completed" }))
}

#[derive(Debug, Deserialize)]
pub struct NotificationRequest {
    pub recipient: Option<String>,
    pub template: Option<String>,
}

/// `POST /api/send-notification`: consumes the validated SMTP config
/// and the bounded template cache.
pub async fn send_notification(
    State(state): State<AppState>,
    Extension(log): Extension<RequestLog>,
    Json(request): Json<NotificationRequest>,
) -> Response {
    let template_name = request.template.as_deref().unwrap_or("default");
    let template = state.templates.get_or_load(template_name);

    log.info(
        "Sending notification",
        json!({
            "smtp_host": state.config.smtp_host,
            "template": template_name,
            "template_bytes": template.len(),
            "has_recipient": request.recipient.is_some(),
        }),
    );

    Json(json!({ "status": "sent", "smtp_host": state.config.smtp_host })).into_response()
}

/// `GET /api/config-info`: non-sensitive configuration presence, for
/// debugging environment issues. Booleans only for keys that exist;
/// never values of secret keys.
pub async fn config_info(State(state): State<AppState>) -> Json<Value> {
    let present = |key: &str| state.source.get(key).is_some_and(|value| !value.is_empty());

    Json(json!({
        "smtp_configured": present("SMTP_HOST"),
        "redis_configured": present("REDIS_URL"),
        "push_configured": present("PUSH_API_KEY"),
        "log_level": state.source.get("LOG_LEVEL").unwrap_or_else(|| "INFO".to_string()),
        "environment": state.source.get("ENVIRONMENT").unwrap_or_else(|| "unknown".to_string()),
    }))
}
