//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (timeout, panic recovery, correlation)
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - The correlation layer is outermost so every response, including
//!   timeouts and recovered panics, passes through the completion hook
//! - No route is reachable before the validated Config exists: AppState
//!   cannot be built without one

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::schema::Config;
use crate::config::source::ConfigSource;
use crate::health;
use crate::health::memory::{MemoryProbe, ProcStatusProbe};
use crate::http::handlers;
use crate::http::middleware::correlation::correlation_middleware;
use crate::observability::logging::LogEmitter;
use crate::templates::TemplateCache;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const TEMPLATE_CACHE_CAPACITY: usize = 100;
const DEFAULT_FAILURE_RATE: f64 = 0.1;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Validated at startup, immutable thereafter.
    pub config: Arc<Config>,

    /// Live source behind the readiness probe.
    pub source: Arc<dyn ConfigSource>,

    pub emitter: LogEmitter,
    pub templates: Arc<TemplateCache>,
    pub memory: Arc<dyn MemoryProbe>,

    /// Simulated datastore failure rate for the demo handlers.
    pub failure_rate: f64,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn ConfigSource>, emitter: LogEmitter) -> Self {
        Self {
            config: Arc::new(config),
            source,
            emitter,
            templates: Arc::new(TemplateCache::new(TEMPLATE_CACHE_CAPACITY)),
            memory: Arc::new(ProcStatusProbe),
            failure_rate: DEFAULT_FAILURE_RATE,
        }
    }

    /// Override the simulated failure rate (tests pin it to 0.0 or 1.0).
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = rate;
        self
    }

    pub fn with_memory_probe(mut self, probe: Arc<dyn MemoryProbe>) -> Self {
        self.memory = probe;
        self
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/users/{user_id}", get(handlers::get_user))
        .route("/api/orders", post(handlers::create_order))
        .route("/api/slow", get(handlers::slow))
        .route("/api/send-notification", post(handlers::send_notification))
        .route("/api/config-info", get(handlers::config_info))
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/debug/memory", get(health::debug_memory))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .layer(CatchPanicLayer::new())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            correlation_middleware,
        ))
        .with_state(state)
}

/// HTTP server for the API service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        Self {
            router: build_router(state),
        }
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
