//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layer stack)
//!     → middleware/correlation.rs (request id, start entry)
//!     → handlers.rs (business collaborators)
//!     → error.rs (taxonomy → generic response, diagnostics → log)
//!     → middleware/correlation.rs (completion entry, severity, metrics)
//!     → Send to client
//! ```

pub mod context;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use context::{RequestContext, RequestLog, X_REQUEST_ID};
pub use error::RequestError;
pub use server::{build_router, AppState, HttpServer};
