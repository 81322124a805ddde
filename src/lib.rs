//! Operational-reliability layer for a request-serving API.
//!
//! Correlation-aware structured logging and a fail-fast startup
//! configuration gate, wrapped around a small demonstration API.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod templates;

pub use config::schema::Config;
pub use http::server::{AppState, HttpServer};
pub use lifecycle::Shutdown;
pub use observability::logging::LogEmitter;

/// Service name stamped into every log entry.
pub const SERVICE_NAME: &str = "api-service";
