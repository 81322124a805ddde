//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Validate config → fail fast or build state → bind listener →
//!     begin serving
//!
//! Shutdown (shutdown.rs):
//!     Signal received → stop accepting → drain in-flight requests →
//!     exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, no partial startup
//! - The listener binds only after the configuration gate has passed

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
