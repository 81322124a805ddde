//! Request metrics recording.
//!
//! # Metrics
//! - `api_requests_total` (counter): completed requests by method, status
//! - `api_request_duration_seconds` (histogram): latency distribution

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter, listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed request. Requests that never produced a response
/// are labeled `aborted`.
pub fn record_request(method: &str, status: Option<u16>, duration: Duration) {
    let status_label = match status {
        Some(code) => code.to_string(),
        None => "aborted".to_string(),
    };
    counter!(
        "api_requests_total",
        "method" => method.to_string(),
        "status" => status_label
    )
    .increment(1);
    histogram!(
        "api_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(duration.as_secs_f64());
}
