//! Shared utilities for integration testing.
#![allow(dead_code)]

use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tokio::net::TcpListener;

use api_service::config::source::{ConfigSource, MapSource};
use api_service::config::validation::validate;
use api_service::http::server::{AppState, HttpServer};
use api_service::lifecycle::Shutdown;
use api_service::observability::logging::LogEmitter;

/// In-memory log sink shared between the emitter and test assertions.
#[derive(Clone, Default)]
pub struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl SharedSink {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn entries(&self) -> Vec<Value> {
        self.contents()
            .lines()
            .map(|line| serde_json::from_str(line).expect("every log line must be valid JSON"))
            .collect()
    }

    pub fn entries_with_message(&self, message: &str) -> Vec<Value> {
        self.entries()
            .into_iter()
            .filter(|entry| entry["message"] == message)
            .collect()
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// A source carrying every required key.
pub fn full_source() -> Arc<MapSource> {
    Arc::new(MapSource::new(&[
        ("SMTP_HOST", "smtp.example.com"),
        ("SMTP_PORT", "587"),
        ("SMTP_USER", "mailer"),
        ("SMTP_PASS", "smtp-secret-pass"),
        ("PUSH_API_KEY", "push-key-123"),
        ("REDIS_URL", "redis://localhost:6379"),
        ("USER_SERVICE_URL", "http://users.internal"),
    ]))
}

/// Validate against `source` and build app state with a deterministic
/// (never-failing) simulated dependency.
pub fn test_state(source: Arc<MapSource>) -> (AppState, SharedSink) {
    let sink = SharedSink::default();
    let emitter = LogEmitter::with_sink("api-service", Box::new(sink.clone()));
    let config = validate(source.as_ref(), &emitter).expect("test config must validate");
    let dyn_source: Arc<dyn ConfigSource> = source;
    let state = AppState::new(config, dyn_source, emitter).with_failure_rate(0.0);
    (state, sink)
}

/// Spawn the full server on an ephemeral port.
pub async fn spawn_server(state: AppState) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(state);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Give the accept loop a moment to come up.
    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// Non-pooled client for test stability.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
